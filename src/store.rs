//! Snapshot persistence through a key-value blob store.
//!
//! The engine never owns storage. The editor hands it a [`Storage`] (browser
//! local storage, a file, a database row) and [`SnapshotStore`] reads and
//! writes the single saved workflow through it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::StoreError;
use crate::parse::types::WorkflowSnapshot;

/// String blobs under string keys.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One `{key}.json` file per key under `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

pub struct SnapshotStore<S> {
    storage: S,
    key: String,
}

impl<S: Storage> SnapshotStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        SnapshotStore {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored snapshot, or `None` when nothing usable is stored. Bad
    /// contents are logged, never returned as an error.
    pub fn load(&self) -> Option<WorkflowSnapshot> {
        let raw = self.storage.get(&self.key)?;
        decode_snapshot(&raw)
    }

    /// Like [`load`](Self::load), falling back to an empty workflow.
    pub fn load_or_empty(&self) -> WorkflowSnapshot {
        self.load().unwrap_or_else(WorkflowSnapshot::empty)
    }

    /// Overwrite the stored snapshot.
    pub fn save(&mut self, snapshot: &WorkflowSnapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string(snapshot)?;
        self.storage.set(&self.key, raw)?;
        log::info!(
            "saved workflow snapshot under '{}' ({} nodes, {} edges)",
            self.key,
            snapshot.nodes.len(),
            snapshot.edges.len()
        );
        Ok(())
    }
}

/// Decode a stored snapshot. The text must be JSON with array-typed `nodes`
/// and `edges` that fit the typed model; anything else is logged and dropped.
pub fn decode_snapshot(raw: &str) -> Option<WorkflowSnapshot> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("failed to load stored workflow: {}", e);
            return None;
        }
    };

    let has_shape = value.get("nodes").is_some_and(Value::is_array)
        && value.get("edges").is_some_and(Value::is_array);
    if !has_shape {
        log::warn!("stored workflow is missing `nodes` or `edges` arrays");
        return None;
    }

    match serde_json::from_value(value) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            log::warn!("stored workflow does not match the node model: {}", e);
            None
        }
    }
}
