use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result alias used by the service layer.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the mutation coordinator to its callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    /// Malformed or out-of-range input, from a form or the store.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    UniqueConstraint(String),
    #[error("{0}")]
    ForeignKey(String),
    #[error("{0}")]
    CrossOwner(String),
    #[error("the record was modified concurrently, reload and retry")]
    ConcurrencyConflict,
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            err @ RepositoryError::Validation { .. } => ServiceError::Validation(err.to_string()),
            RepositoryError::UniqueViolation(message) => ServiceError::UniqueConstraint(message),
            RepositoryError::ForeignKeyViolation(message) => ServiceError::ForeignKey(message),
            err @ RepositoryError::CrossOwnerViolation { .. } => {
                ServiceError::CrossOwner(err.to_string())
            }
            RepositoryError::ConcurrencyConflict => ServiceError::ConcurrencyConflict,
            err @ (RepositoryError::Database(_) | RepositoryError::Pool(_)) => {
                ServiceError::Internal(err.to_string())
            }
        }
    }
}
