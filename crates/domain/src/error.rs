//! Domain error types

use thiserror::Error;

/// Errors produced by the store mutation operations.
///
/// None of these are fatal: callers recover by aborting the current
/// command and leaving the collection list untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A name was empty or missing on create or rename.
    #[error("invalid name: must not be empty")]
    InvalidName,

    /// The operation targeted a collection that does not exist.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// The operation targeted a request that does not exist in its collection.
    #[error("request not found: {0}")]
    RequestNotFound(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
