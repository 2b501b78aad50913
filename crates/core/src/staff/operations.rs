use super::error::StaffError;
use super::requests::{EmployeeUpdate, NewEmployee, NewVacation};
use super::types::Vacation;

/// Validates an employee name.
pub fn validate_employee_name(name: &str) -> Result<(), StaffError> {
    if name.trim().is_empty() {
        return Err(StaffError::EmptyName);
    }
    if name.len() > 200 {
        return Err(StaffError::NameTooLong);
    }
    Ok(())
}

/// Validates an employee before creation.
pub fn validate_new_employee(employee: &NewEmployee) -> Result<(), StaffError> {
    validate_employee_name(&employee.name)
}

/// Validates the fields an update would change.
pub fn validate_employee_update(update: &EmployeeUpdate) -> Result<(), StaffError> {
    match &update.name {
        Some(name) => validate_employee_name(name),
        None => Ok(()),
    }
}

/// Validates a vacation before creation.
pub fn validate_new_vacation(vacation: &NewVacation) -> Result<(), StaffError> {
    if vacation.end_date < vacation.start_date {
        return Err(StaffError::InvalidDateRange);
    }
    Ok(())
}

/// Keeps vacations matching an optional approval filter.
///
/// `None` matches every vacation; `Some(flag)` matches decided vacations
/// with that decision only.
pub fn filter_by_approval(vacations: &[Vacation], approved: Option<bool>) -> Vec<&Vacation> {
    vacations
        .iter()
        .filter(|vacation| match approved {
            Some(flag) => vacation.approved == Some(flag),
            None => true,
        })
        .collect()
}

/// Keeps vacations that still await a decision.
pub fn filter_pending(vacations: &[Vacation]) -> Vec<&Vacation> {
    vacations.iter().filter(|v| v.is_pending()).collect()
}
