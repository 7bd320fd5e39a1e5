mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::StorageKind;
use crate::services::store::{FileKvStore, KvStore, MemoryKvStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "no .env loaded");
    }
    let config = config::Config::from_env()?;

    let store: Arc<dyn KvStore> = match config.storage {
        StorageKind::File => Arc::new(FileKvStore::new(&config.data_dir)),
        StorageKind::Memory => Arc::new(MemoryKvStore::new()),
    };
    let state = state::AppState::new(store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    info!(
        port = config.port,
        storage = ?config.storage,
        data_dir = %config.data_dir.display(),
        "holdboard listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
