//! Domain errors for the caseflow workflow tracker.

use thiserror::Error;
use uuid::Uuid;

/// Domain-level errors that can occur in the caseflow system.
///
/// Missing templates and executions on *read* paths are modeled as
/// `Option`, not errors. The variants here cover creation against a
/// dangling template reference, writes against a missing execution
/// (a permissive no-op callers may ignore), validation, and storage
/// failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Template not found: {0}")]
    TemplateNotFound(Uuid),

    #[error("Execution not found: {0}")]
    ExecutionNotFound(Uuid),

    /// Reserved for future step-addressed writes. Missing steps on
    /// today's operations surface as `None`, never as this error.
    #[error("Step not found: {step_id} in template {template_id}")]
    StepNotFound { template_id: Uuid, step_id: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidStateTransition { from: String, to: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Convenience alias used throughout the domain and service layers.
pub type DomainResult<T> = Result<T, DomainError>;

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::StorageError(err.to_string())
    }
}
