//! Nectar API client - host process entry point
//!
//! Wires the file-backed collection store and the reqwest transport
//! into the command router, then serves the editor panel over the
//! stdio host protocol until the panel disconnects.

use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use nectar_infrastructure::{FileCollectionStore, ReqwestHttpClient, default_data_dir};

mod host;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the host protocol.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir = std::env::var_os("NECTAR_DATA_DIR")
        .map(PathBuf::from)
        .or_else(default_data_dir)
        .ok_or("no data directory available; set NECTAR_DATA_DIR")?;

    let storage = FileCollectionStore::open(&data_dir).await;
    let client = ReqwestHttpClient::new()?;

    tracing::info!(
        record = %storage.path().display(),
        "nectar v{} ready",
        env!("CARGO_PKG_VERSION")
    );

    host::run(storage, client).await;

    Ok(())
}
