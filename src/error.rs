use thiserror::Error;

/// Main error type for query DSL construction
#[derive(Error, Debug)]
pub enum DslError {
    #[error("Invalid Type: expected {expected}, got {actual}")]
    InvalidArgumentType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Unknown terms lookup key: {0}")]
    UnknownLookupKey(String),

    #[error("Clause has no field set")]
    MissingField,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for query DSL operations
pub type Result<T> = std::result::Result<T, DslError>;

impl DslError {
    /// Check if this error came from an argument shape check
    pub fn is_type_error(&self) -> bool {
        matches!(self, DslError::InvalidArgumentType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DslError::InvalidArgumentType {
            expected: "array",
            actual: "string",
        };
        assert_eq!(err.to_string(), "Invalid Type: expected array, got string");

        let err = DslError::UnknownLookupKey("shard".to_string());
        assert_eq!(err.to_string(), "Unknown terms lookup key: shard");
    }

    #[test]
    fn test_type_errors() {
        assert!(DslError::InvalidArgumentType {
            expected: "object",
            actual: "null",
        }
        .is_type_error());
        assert!(!DslError::MissingField.is_type_error());
        assert!(!DslError::InvalidRequest("bad".to_string()).is_type_error());
    }
}
