//! Key-value storage for user preferences
//!
//! The browser keeps preferences in `localStorage`; the CLI keeps them in a
//! small JSON file under the site directory. Both sit behind
//! [`KeyValueStore`] so preference logic can be tested in memory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Store file name, relative to the site directory
pub const STORE_FILE: &str = ".postdeck/storage.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String-keyed, string-valued storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Volatile store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    /// Version of the store format
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Store persisted as JSON, written through on every change
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    data: StoreData,
}

impl FileStore {
    /// Current store format version
    const VERSION: u32 = 1;

    /// Open the store for a site directory, starting empty when the file is
    /// missing, unreadable or from another format version
    pub fn open(base_dir: &Path) -> Self {
        let path = base_dir.join(STORE_FILE);
        let data = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<StoreData>(&content) {
                Ok(data) if data.version == Self::VERSION => data,
                Ok(_) => {
                    tracing::info!("Store version mismatch, starting empty");
                    StoreData::default()
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable store {:?}: {}", path, e);
                    StoreData::default()
                }
            },
            Err(_) => StoreData::default(),
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `data` to disk and adopt it; on failure the store is unchanged
    fn commit(&mut self, mut data: StoreData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        data.version = Self::VERSION;
        let content = serde_json::to_string_pretty(&data)?;
        fs::write(&self.path, content)?;
        self.data = data;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.data.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut data = self.data.clone();
        data.entries.insert(key.to_string(), value.to_string());
        self.commit(data)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.data.entries.contains_key(key) {
            return Ok(());
        }
        let mut data = self.data.clone();
        data.entries.remove(key);
        self.commit(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("theme"), None);
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme"), None);
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = FileStore::open(dir.path());
        assert_eq!(store.get("theme"), None);
        store.set("theme", "light").unwrap();
        assert!(dir.path().join(STORE_FILE).exists());

        let reopened = FileStore::open(dir.path());
        assert_eq!(reopened.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path());
        store.set("theme", "light").unwrap();

        // a plain file where the store directory should be
        let blocked = tempfile::tempdir().unwrap();
        fs::write(blocked.path().join(".postdeck"), "").unwrap();
        store.path = blocked.path().join(STORE_FILE);

        assert!(store.set("theme", "dark").is_err());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert!(store.remove("theme").is_err());
        assert_eq!(store.get("theme").as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".postdeck")).unwrap();
        fs::write(dir.path().join(STORE_FILE), "not json").unwrap();

        let store = FileStore::open(dir.path());
        assert_eq!(store.get("theme"), None);
    }
}
