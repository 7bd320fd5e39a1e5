//! Key-value storage behind the puzzle and selection services.
//!
//! DESIGN
//! ======
//! Each key holds one JSON document (the full puzzle list, the full
//! selection list). Services read the whole document, change it in memory
//! and write it back, so a single writer at a time is assumed; `AppState`
//! provides the lock that guarantees it.
//!
//! `FileKvStore` keeps one `<key>.json` file per key under the data
//! directory and replaces it atomically (write to a temp file, then rename),
//! so a crash mid-write leaves the previous document intact.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
    #[error("io error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document under {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Async string key-value store. Enables swapping the file store for an
/// in-memory one in tests.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Raw document stored under `key`, or `None` if the key was never written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the key is invalid or the backend fails.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the key is invalid or the backend fails.
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError>;
}

// =============================================================================
// JSON HELPERS
// =============================================================================

/// Read and decode the document under `key`.
///
/// # Errors
///
/// Returns [`StoreError::Json`] if the stored document does not decode as `T`.
pub async fn get_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Json { key: key.to_owned(), source })
}

/// Encode `value` and store it under `key`.
///
/// # Errors
///
/// Returns a [`StoreError`] if encoding or the write fails.
pub async fn put_json<T: Serialize + Sync>(store: &dyn KvStore, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Json { key: key.to_owned(), source })?;
    store.put(key, raw).await
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid { Ok(()) } else { Err(StoreError::InvalidKey(key.to_owned())) }
}

// =============================================================================
// FILE STORE
// =============================================================================

pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// Store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait::async_trait]
impl KvStore for FileKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { key: key.to_owned(), source }),
        }
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let io_err = |source| StoreError::Io { key: key.to_owned(), source };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;
        tokio::fs::write(&tmp, value).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;
        Ok(())
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.write().await.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
