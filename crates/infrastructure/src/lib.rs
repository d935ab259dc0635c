//! Nectar Infrastructure - adapters for the application ports
//!
//! Concrete implementations of the application-layer ports: an HTTP
//! transport backed by reqwest and a single-file JSON collection store
//! backed by `tokio::fs`.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestHttpClient;
pub use persistence::{FileCollectionStore, default_data_dir};
