//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic input failures. Storage concerns belong
/// to the infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed validation (empty field, malformed date, unknown or
    /// duplicate item name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A well-formed date that does not exist in the calendar.
    #[error("date conversion failed: {0}")]
    Conversion(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// The bare message, without the kind prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::Conversion(msg) => msg,
        }
    }
}
