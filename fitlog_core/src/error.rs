//! Error types for the fitlog_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied a missing or unacceptable field
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// No record with the requested id
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    /// A supplied or stored date string could not be parsed
    #[error("Malformed date {value:?}: {reason}")]
    MalformedDate { value: String, reason: String },

    /// Writing a collection back to storage failed
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl Error {
    /// Validation error for a required field that was not supplied
    pub fn missing_field(field: &str) -> Self {
        Error::Validation {
            field: field.to_string(),
            reason: "missing required field".into(),
        }
    }

    /// Expected failures the caller can correct and retry
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_the_field() {
        let err = Error::missing_field("session_goal");
        assert!(err.to_string().contains("session_goal"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_found_message() {
        let err = Error::NotFound { kind: "workout", id: 7 };
        assert_eq!(err.to_string(), "workout 7 not found");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unexpected_errors_are_not_recoverable() {
        let err = Error::MalformedDate {
            value: "yesterday".into(),
            reason: "unrecognised format".into(),
        };
        assert!(!err.is_recoverable());
        assert!(!Error::Persistence("disk full".into()).is_recoverable());
    }
}
