//! Persistent currency storage.
//!
//! The only thing that survives a session is the persistent balance. It is
//! read once before the run starts and written once after it ends.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use aetheria_core::constants::DEFAULT_PERSISTENT_CURRENCY;

/// Environment variable naming the directory that holds the save file.
pub const SAVE_DIR_ENV: &str = "AETHERIA_SAVE_DIR";

const SAVE_FILE: &str = "aetheria_currency.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid save data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the persistent balance lives between sessions.
pub trait CurrencyStore {
    /// Stored balance, or the default when nothing has been saved yet.
    fn load_persistent_currency(&self) -> Result<u32, PersistenceError>;
    fn save_persistent_currency(&self, amount: u32) -> Result<(), PersistenceError>;
}

/// On-disk document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SaveData {
    persistent_currency: u32,
}

/// JSON file store: `{ "persistent_currency": <u32> }`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory from `AETHERIA_SAVE_DIR`, falling back to the OS temp dir.
    pub fn from_env() -> Self {
        let dir = std::env::var_os(SAVE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::new(dir)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SAVE_FILE)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl CurrencyStore for JsonFileStore {
    fn load_persistent_currency(&self) -> Result<u32, PersistenceError> {
        let path = self.path();
        if !path.exists() {
            return Ok(DEFAULT_PERSISTENT_CURRENCY);
        }
        let json = fs::read_to_string(&path).map_err(io_error(&path))?;
        let data: SaveData =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Json {
                path: path.clone(),
                source,
            })?;
        Ok(data.persistent_currency)
    }

    fn save_persistent_currency(&self, amount: u32) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;
        let path = self.path();
        let data = SaveData {
            persistent_currency: amount,
        };
        let json = serde_json::to_string_pretty(&data).map_err(|source| {
            PersistenceError::Json {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(io_error(&path))?;
        Ok(())
    }
}
