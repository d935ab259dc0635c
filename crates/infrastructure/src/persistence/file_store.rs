//! File-backed collection store.
//!
//! The entire ordered collection list lives in one JSON record that is
//! shared process-wide across all sessions: read at session start and
//! rewritten after every mutation.

use std::path::{Path, PathBuf};

use tokio::fs;

use nectar_application::ports::{CollectionStorage, StorageError};
use nectar_domain::Collection;

use crate::serialization::{from_json, to_json_stable};

/// File name of the durable record.
const STORE_FILE: &str = "collections.json";

/// File name of the abandoned per-session record. Earlier versions kept
/// one record per session; its contents are discarded, not migrated.
const LEGACY_STORE_FILE: &str = "collections.session.json";

/// `CollectionStorage` implementation over a single JSON file.
pub struct FileCollectionStore {
    path: PathBuf,
}

impl FileCollectionStore {
    /// Creates a store over an explicit record path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the store inside `dir`, cleaning up the legacy per-session
    /// record if one is still around.
    pub async fn open(dir: &Path) -> Self {
        let legacy = dir.join(LEGACY_STORE_FILE);
        match fs::remove_file(&legacy).await {
            Ok(()) => tracing::info!(path = %legacy.display(), "discarded legacy session record"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::debug!(path = %legacy.display(), error = %e, "legacy cleanup failed"),
        }
        Self::new(dir.join(STORE_FILE))
    }

    /// Path of the backing record.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionStorage for FileCollectionStore {
    async fn load(&self) -> Result<Vec<Collection>, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(text) => from_json(&text).map_err(|e| StorageError::Serialization(e.to_string())),
            // A store that has never been written is an empty list.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn save(&self, collections: &[Collection]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json =
            to_json_stable(&collections).map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, json).await.map_err(StorageError::Io)
    }
}

/// Default data directory for the durable record.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("nectar"))
}
