//! Application error types

use thiserror::Error;

use crate::ports::StorageError;

/// Application-level errors.
///
/// Store-level failures (invalid names, unknown targets) are recovered
/// inside the router and never reach this type; what remains is the
/// persistence layer, which the host logs and survives.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Loading or saving the persisted collection list failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
