use thiserror::Error;

/// Errors raised when validating staff requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StaffError {
    #[error("Employee name cannot be empty")]
    EmptyName,
    #[error("Employee name too long (max 200 characters)")]
    NameTooLong,
    #[error("Vacation end date must be on or after the start date")]
    InvalidDateRange,
}
