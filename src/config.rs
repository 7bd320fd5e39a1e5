//! Service configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Where puzzles and selections are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    /// JSON files under `data_dir`.
    #[default]
    File,
    /// Process memory; everything is lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub storage: StorageKind,
    /// Directory holding one JSON document per storage key.
    pub data_dir: PathBuf,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `HOLDBOARD_STORAGE`: `file` (default) or `memory`
    /// - `HOLDBOARD_DATA_DIR`: default `./data`
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PORT` is not a port number or
    /// `HOLDBOARD_STORAGE` names an unknown backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };
        let storage = parse_storage(get("HOLDBOARD_STORAGE"))?;
        let data_dir = get("HOLDBOARD_DATA_DIR").map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        Ok(Self { port, storage, data_dir })
    }
}

fn parse_storage(raw: Option<String>) -> Result<StorageKind, ConfigError> {
    match raw.as_deref() {
        None | Some("file") => Ok(StorageKind::File),
        Some("memory") => Ok(StorageKind::Memory),
        Some(other) => Err(ConfigError::Invalid { var: "HOLDBOARD_STORAGE", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
