//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Missing required field or out-of-range value
    #[error("validation failed: {0}")]
    Validation(String),

    /// The addressed record does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Rejected credentials or insufficient role
    #[error("access denied: {0}")]
    Auth(String),

    /// Unique constraint violation
    #[error("{0}")]
    Conflict(String),

    /// Underlying store failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
