//! Application error types for GeoBench binaries.

use thiserror::Error;

/// Main application error type used across the runner and probes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Case directory missing or unreadable
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A command template could not be parsed or rendered
    #[error("Template error: {0}")]
    Template(String),

    /// Case identifier rejected
    #[error("Invalid case: {0}")]
    InvalidCase(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AppError {
    /// Returns the error code string for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Discovery(_) => "DISCOVERY_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::InvalidCase(_) => "INVALID_CASE",
            AppError::SerializationError(_) => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
