//! Error types for the casegen crate.

use thiserror::Error;

/// Comprehensive error types for test case generation
#[derive(Error, Debug, Clone)]
pub enum CasegenError {
    // Configuration errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("AI provider not configured: {provider}")]
    ProviderNotConfigured { provider: String },

    #[error("Unknown AI provider: '{provider}'")]
    UnknownProvider { provider: String },

    // Provider errors (transport, auth, API-level)
    #[error("AI provider error: {0}")]
    Provider(String),

    // Response handling errors
    #[error("AI response parse error: {reason}")]
    ResponseParse { reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParse { reason: String },

    // Prompt errors
    #[error("Prompt template error: {reason}")]
    Template { reason: String },

    // Export errors
    #[error("Spreadsheet export error: {reason}")]
    Export { reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWrite { path: String, reason: String },

    // Validation errors
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // General errors
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl From<std::io::Error> for CasegenError {
    fn from(err: std::io::Error) -> Self {
        Self::Export {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CasegenError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for casegen operations
pub type CasegenResult<T> = Result<T, CasegenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CasegenError::UnknownProvider {
            provider: "bard".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown AI provider: 'bard'");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CasegenError = io_err.into();
        assert!(matches!(err, CasegenError::Export { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CasegenError = json_err.into();
        assert!(matches!(err, CasegenError::JsonParse { .. }));
    }
}
