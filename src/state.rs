//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the key-value store and the single write lock. Every service
//! call that writes takes the lock for its whole read-modify-write cycle,
//! so concurrent requests never interleave partial updates. Reads go
//! straight to the store.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::store::KvStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub write_lock: Arc<Mutex<()>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store, write_lock: Arc::new(Mutex::new(())) }
    }
}
