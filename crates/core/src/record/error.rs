//! Brand record error types.

use brandtrack_shared::AppError;
use thiserror::Error;

use crate::brand::Brand;

/// Brand record operation errors.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The brand name is not one of the registered brands.
    #[error("unknown brand: {0}")]
    InvalidBrand(String),

    /// Required fields are missing or malformed.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// No record with this id in the brand's collection.
    #[error("record {id} not found for brand {brand}")]
    NotFound {
        /// Brand collection searched.
        brand: Brand,
        /// Requested id.
        id: i32,
    },

    /// Persistence operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl RecordError {
    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::InvalidBrand(_) | RecordError::InvalidPayload(_) => {
                Self::Validation(err.to_string())
            }
            RecordError::NotFound { .. } => Self::NotFound(err.to_string()),
            RecordError::Repository(msg) => Self::Database(msg),
        }
    }
}
