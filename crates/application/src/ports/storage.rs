//! Collection storage port

use std::future::Future;

use nectar_domain::Collection;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the persisted record failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted record could not be serialized or parsed.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

/// Port for the durable single-record collection store.
///
/// The whole ordered collection list is one unit of persistence: it is
/// loaded once per command and rewritten after every mutation. The
/// record is shared process-wide across all sessions.
pub trait CollectionStorage: Send + Sync {
    /// Loads the persisted collection list.
    ///
    /// A store that has never been written yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or parsed.
    fn load(&self) -> impl Future<Output = Result<Vec<Collection>, StorageError>> + Send;

    /// Replaces the persisted collection list.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be serialized or written.
    fn save(
        &self,
        collections: &[Collection],
    ) -> impl Future<Output = Result<(), StorageError>> + Send;
}
