//! In-process storage backend.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::{ProfileStore, StorageError};

/// Profiles held in a process-local map. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no profile has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get(&self, id: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().get(id).cloned())
    }

    async fn set(&self, id: &str, value: &Value) -> Result<(), StorageError> {
        self.entries.write().insert(id.to_string(), value.clone());
        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.entries.read().contains_key(id))
    }

    async fn list_ids(&self) -> Result<Option<HashSet<String>>, StorageError> {
        Ok(Some(self.entries.read().keys().cloned().collect()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
