use thiserror::Error;

use crate::staff::StaffError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn employee_not_found(id: i64) -> Self {
        RepositoryError::NotFound {
            entity_type: "Employee",
            id: id.to_string(),
        }
    }

    pub fn vacation_not_found(id: i64) -> Self {
        RepositoryError::NotFound {
            entity_type: "Vacation",
            id: id.to_string(),
        }
    }
}

impl From<StaffError> for RepositoryError {
    fn from(error: StaffError) -> Self {
        RepositoryError::InvalidData(error.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
