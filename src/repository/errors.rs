use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Result alias used by every repository operation.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Typed failures raised by the entity store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The addressed row does not exist.
    #[error("record not found")]
    NotFound,
    /// A required field is blank or a value exceeds its limits.
    #[error("invalid `{field}`: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    /// A write would duplicate a unique value (product SKU).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    /// A write references a row that does not exist.
    #[error("foreign key violated: {0}")]
    ForeignKeyViolation(String),
    /// A product and a campaign belong to different clients.
    #[error("product {product_id} does not belong to client {client_id}")]
    CrossOwnerViolation { client_id: i32, product_id: i32 },
    /// The row was modified by another writer since it was read.
    #[error("row was modified concurrently")]
    ConcurrencyConflict,
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

impl RepositoryError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => Self::NotFound,
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => Self::Validation {
                field: "row",
                message: info.message().to_string(),
            },
            other => Self::Database(other),
        }
    }
}
