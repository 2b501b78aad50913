//! Request payloads for staff operations.
//!
//! Pure data types shared by the HTTP layer and the repositories.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::Employee;

/// Payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub user_id: i64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, user_id: i64) -> Self {
        Self {
            name: name.into(),
            user_id,
        }
    }
}

/// Partial update for an employee. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl EmployeeUpdate {
    /// Sets the new name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new login account.
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Returns true if the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.user_id.is_none()
    }

    /// Applies the set fields to an employee.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(name) = &self.name {
            employee.name = name.clone();
        }
        if let Some(user_id) = self.user_id {
            employee.user_id = user_id;
        }
    }
}

/// Payload for an administrator creating a vacation directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVacation {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub approved: Option<bool>,
}

/// Payload for an employee requesting time off.
///
/// Unlike [`NewVacation`], a request can never carry a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<VacationRequest> for NewVacation {
    fn from(request: VacationRequest) -> Self {
        Self {
            employee_id: request.employee_id,
            start_date: request.start_date,
            end_date: request.end_date,
            approved: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_applies_only_set_fields() {
        let mut employee = Employee::new(1, "Grace", 10);

        EmployeeUpdate::default()
            .with_name("Grace Hopper")
            .apply_to(&mut employee);

        assert_eq!(employee.name, "Grace Hopper");
        assert_eq!(employee.user_id, 10);
    }

    #[test]
    fn test_empty_update() {
        assert!(EmployeeUpdate::default().is_empty());
        assert!(!EmployeeUpdate::default().with_user_id(3).is_empty());
    }

    #[test]
    fn test_update_deserializes_partial_body() {
        let update: EmployeeUpdate = serde_json::from_str(r#"{"user_id": 5}"#).unwrap();

        assert_eq!(update.name, None);
        assert_eq!(update.user_id, Some(5));
    }

    #[test]
    fn test_vacation_request_is_always_pending() {
        let request: VacationRequest = serde_json::from_str(
            r#"{"employee_id": 4, "start_date": "2024-08-01",
                "end_date": "2024-08-05", "approved": true}"#,
        )
        .unwrap();

        let new_vacation = NewVacation::from(request);

        assert_eq!(new_vacation.employee_id, 4);
        assert_eq!(new_vacation.approved, None);
    }

    #[test]
    fn test_new_vacation_approval_defaults_to_pending() {
        let new_vacation: NewVacation = serde_json::from_str(
            r#"{"employee_id": 4, "start_date": "2024-08-01", "end_date": "2024-08-05"}"#,
        )
        .unwrap();

        assert_eq!(new_vacation.approved, None);
    }
}
