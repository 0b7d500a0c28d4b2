//! Error types for the Chimera skills layer

use thiserror::Error;

/// Result type alias using the skills layer's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the skills layer
#[derive(Error, Debug)]
pub enum Error {
    /// Input record failed construction-time validation
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level failure reaching the external client
    #[error("connection error: {0}")]
    Connection(String),

    /// The external client did not answer in time
    #[error("timeout: {0}")]
    Timeout(String),

    /// The external server rejected or failed a tool/resource request
    #[error("resource error: {0}")]
    Resource(String),

    /// Template registration or rendering failure
    #[error("template error: {0}")]
    Template(String),

    /// JSON serialization/deserialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a validation error for a named field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if error is transient and a caller may retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Connection(_))
    }

    /// Check if error was caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation { .. })
    }
}
