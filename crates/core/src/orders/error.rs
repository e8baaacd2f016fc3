//! Order ledger error types.

use brandtrack_shared::AppError;
use thiserror::Error;

/// Kmart order operation errors.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A save was requested with no records.
    #[error("no records provided")]
    EmptyBatch,

    /// A month filter outside `1..=12`.
    #[error("invalid month: {0}")]
    InvalidMonth(u32),

    /// Persistence operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

impl OrderError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyBatch | OrderError::InvalidMonth(_) => {
                Self::Validation(err.to_string())
            }
            OrderError::Repository(msg) => Self::Database(msg),
        }
    }
}
