use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An employee together with the vacations they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    /// Login account backing this employee.
    pub user_id: i64,
    /// Owned vacations, ordered by id. Always loaded with the employee.
    #[serde(default)]
    pub vacations: Vec<Vacation>,
}

impl Employee {
    /// Creates an employee with no vacations.
    pub fn new(id: i64, name: impl Into<String>, user_id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            user_id,
            vacations: Vec::new(),
        }
    }

    /// Replaces the vacation collection.
    pub fn with_vacations(mut self, vacations: Vec<Vacation>) -> Self {
        self.vacations = vacations;
        self
    }
}

/// A vacation period requested by an employee.
///
/// `approved` is tri-state: `None` while the request is pending, then
/// `Some(true)` or `Some(false)` once an administrator decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub id: i64,
    pub employee_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub approved: Option<bool>,
}

impl Vacation {
    /// Creates a pending vacation.
    pub fn pending(id: i64, employee_id: i64, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id,
            employee_id,
            start_date,
            end_date,
            approved: None,
        }
    }

    /// Sets the approval decision.
    pub fn with_approval(mut self, approved: Option<bool>) -> Self {
        self.approved = approved;
        self
    }

    /// Returns the three-state approval view.
    pub fn status(&self) -> ApprovalStatus {
        ApprovalStatus::from(self.approved)
    }

    /// Returns true while no decision has been made.
    pub fn is_pending(&self) -> bool {
        self.approved.is_none()
    }

    /// Number of calendar days covered, inclusive.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// Approval state of a vacation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl From<Option<bool>> for ApprovalStatus {
    fn from(approved: Option<bool>) -> Self {
        match approved {
            None => ApprovalStatus::Pending,
            Some(true) => ApprovalStatus::Approved,
            Some(false) => ApprovalStatus::Rejected,
        }
    }
}

impl From<ApprovalStatus> for Option<bool> {
    fn from(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Pending => None,
            ApprovalStatus::Approved => Some(true),
            ApprovalStatus::Rejected => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_pending_vacation_has_no_decision() {
        let vacation = Vacation::pending(1, 7, date(2024, 7, 1), date(2024, 7, 14));

        assert!(vacation.is_pending());
        assert_eq!(vacation.status(), ApprovalStatus::Pending);
    }

    #[test]
    fn test_status_follows_approval_flag() {
        let base = Vacation::pending(1, 7, date(2024, 7, 1), date(2024, 7, 14));

        assert_eq!(
            base.clone().with_approval(Some(true)).status(),
            ApprovalStatus::Approved
        );
        assert_eq!(
            base.with_approval(Some(false)).status(),
            ApprovalStatus::Rejected
        );
    }

    #[test]
    fn test_status_converts_back_to_flag() {
        assert_eq!(Option::<bool>::from(ApprovalStatus::Pending), None);
        assert_eq!(Option::<bool>::from(ApprovalStatus::Approved), Some(true));
        assert_eq!(Option::<bool>::from(ApprovalStatus::Rejected), Some(false));
    }

    #[test]
    fn test_days_is_inclusive() {
        let single = Vacation::pending(1, 7, date(2024, 7, 1), date(2024, 7, 1));
        let fortnight = Vacation::pending(2, 7, date(2024, 7, 1), date(2024, 7, 14));

        assert_eq!(single.days(), 1);
        assert_eq!(fortnight.days(), 14);
    }

    #[test]
    fn test_employee_without_vacations_field_deserializes() {
        let json = r#"{"id": 3, "name": "Ada", "user_id": 9}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();

        assert_eq!(employee, Employee::new(3, "Ada", 9));
    }
}
