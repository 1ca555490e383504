//! Local Storage
//!
//! Flat string key/value persistence for client-side state (session token,
//! selected model). Mirrors browser local storage semantics:
//! - Reads never fail; a missing key is `None`
//! - Writes go through to disk synchronously
//! - No versioning or migration of stored values

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::constants;

/// Key/value store backing client-side state
pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON-file backed store
pub struct FileStore {
    file_path: PathBuf,
    items: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open (or create) the store inside `dir`
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|e| StorageError::Io(e.to_string()))?;

        let file_path = dir.join(constants::STORAGE_FILE);
        let items = if file_path.exists() {
            let content = fs::read_to_string(&file_path)
                .map_err(|e| StorageError::Io(e.to_string()))?;
            match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    // Corrupt file behaves like cleared storage
                    log::warn!("Ignoring unreadable storage file {}: {}", file_path.display(), e);
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        log::debug!("Local storage opened: {}", file_path.display());

        Ok(Self {
            file_path,
            items: Mutex::new(items),
        })
    }

    fn flush(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        fs::write(&self.file_path, content).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl LocalStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock();
        items.insert(key.to_string(), value.to_string());
        self.flush(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.lock();
        if items.remove(key).is_some() {
            self.flush(&items)?;
        }
        Ok(())
    }
}

/// Process-lifetime store, used in tests and when disk storage is unavailable
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().remove(key);
        Ok(())
    }
}

/// Open disk storage, degrading to memory when the directory is unusable.
///
/// With the memory fallback the session token is regenerated on every run.
pub fn open_or_fallback(dir: &Path) -> Box<dyn LocalStore> {
    match FileStore::open(dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Local storage unavailable ({}), state will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Storage errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
