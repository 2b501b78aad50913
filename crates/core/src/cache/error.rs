use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The store could not be reached or rejected the command.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
    /// A value could not be encoded, or cached bytes could not be decoded.
    #[error("Cache encoding error: {0}")]
    Encoding(String),
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let error = CacheError::Unavailable("connection refused".to_string());
        assert_eq!(error.to_string(), "Cache unavailable: connection refused");
    }

    #[test]
    fn test_encoding_display() {
        let error = CacheError::Encoding("invalid JSON".to_string());
        assert_eq!(error.to_string(), "Cache encoding error: invalid JSON");
    }
}
