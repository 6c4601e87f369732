//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more form fields failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A document number (CPF, CEP) is malformed.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization of a payload or session snapshot failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the error code shown next to user-facing messages.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidDocument(_) => "INVALID_DOCUMENT",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns true if the error was caused by user input rather than the
    /// environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidDocument(_))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
