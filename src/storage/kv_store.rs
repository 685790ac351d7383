use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::trace;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Process-wide string-keyed store of JSON blobs. Reads of absent keys are
/// `None`; the repository layer substitutes documented defaults. Writes
/// flush synchronously with no transactional grouping, so multi-key updates
/// are not atomic across a crash.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Vec<String>;
}

/// In-memory store, the test double for the file-backed one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Store persisted as one JSON document in the injected data directory.
/// Every mutation rewrites the document, matching the original app's
/// flush-on-every-write behavior.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, Value>,
}

impl FileStore {
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join("store.json");

        // Unreadable or corrupt content is treated as first use, the same
        // way absent keys are.
        let mut entries = BTreeMap::new();
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(parsed) = serde_json::from_str(&contents) {
                entries = parsed;
            } else {
                trace!(target: "storage", "Discarding unparseable store at {:?}", path);
            }
        }

        Ok(Self { path, entries })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("missing"), None);

        store.put("a", json!({"score": 3})).unwrap();
        assert_eq!(store.get("a"), Some(json!({"score": 3})));

        store.remove("a").unwrap();
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FileStore::open(dir.path()).unwrap();
            store.put("best", json!(42)).unwrap();
        }

        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("best"), Some(json!(42)));
        assert_eq!(store.keys(), vec!["best".to_string()]);
    }

    #[test]
    fn test_file_store_treats_corrupt_document_as_first_use() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("store.json"), "not json at all").unwrap();

        let store = FileStore::open(dir.path()).unwrap();
        assert!(store.keys().is_empty());
    }
}
