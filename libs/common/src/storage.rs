//! Local key-value storage
//!
//! Stands in for browser local storage: string values under string keys,
//! persisted across runs. [`FileStore`] keeps everything in one JSON object
//! on disk; [`MemoryStore`] keeps it in process.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{GalleryError, GalleryResult};

/// Configuration for the on-disk store
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON file backing the store
    pub path: PathBuf,
}

impl StorageConfig {
    /// Create a new StorageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `GALLERY_STORAGE_PATH`: storage file (default: ".gallery/local_storage.json")
    pub fn from_env() -> Self {
        let path = std::env::var("GALLERY_STORAGE_PATH")
            .unwrap_or_else(|_| ".gallery/local_storage.json".to_string());

        StorageConfig {
            path: PathBuf::from(path),
        }
    }
}

/// String key-value store
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> GalleryResult<Option<String>>;

    /// Set a key-value pair, replacing any previous value
    fn set(&self, key: &str, value: &str) -> GalleryResult<()>;

    /// Delete a key; deleting a missing key is not an error
    fn delete(&self, key: &str) -> GalleryResult<()>;
}

/// Store persisted as a single JSON object file
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at the configured path; the file is created on first write
    pub fn new(config: &StorageConfig) -> Self {
        info!("Local storage at {}", config.path.display());
        FileStore {
            path: config.path.clone(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> GalleryResult<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(GalleryError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => Err(GalleryError::Storage(format!(
                "{} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> GalleryResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    GalleryError::Storage(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let body = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, body).map_err(|e| {
            GalleryError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn guard(&self) -> GalleryResult<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| GalleryError::Storage("storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        let _guard = self.guard()?;
        let map = self.read_all()?;

        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        let _guard = self.guard()?;
        let mut map = self.read_all()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        debug!("Stored key {}", key);

        self.write_all(&map)
    }

    fn delete(&self, key: &str) -> GalleryResult<()> {
        let _guard = self.guard()?;
        let mut map = self.read_all()?;

        if map.remove(key).is_some() {
            debug!("Removed key {}", key);
            self.write_all(&map)?;
        }

        Ok(())
    }
}

/// In-process store, used by tests and one-shot runs
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> GalleryResult<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| GalleryError::Storage("storage lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> GalleryResult<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> GalleryResult<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> GalleryResult<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}
