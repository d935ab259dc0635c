//! Persistence adapters.

mod file_store;

pub use file_store::{FileCollectionStore, default_data_dir};
