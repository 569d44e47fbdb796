//! InMemoryDocumentStore - HashMap-backed document store for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::DocumentStore;
use crate::error::StoreError;

/// In-memory document store keyed by document name.
///
/// Documents are kept as serialized bytes so every load decodes a fresh
/// copy, the same as the file-backed store. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty store. Every document starts as an empty collection.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store raw bytes under a document name, bypassing encoding.
    pub fn insert_raw(&self, name: &str, bytes: impl Into<Vec<u8>>) -> Result<(), StoreError> {
        self.write(name, bytes.into())
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned(name.to_string()))?;
        Ok(storage.get(name).cloned())
    }

    fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned(name.to_string()))?;
        storage.insert(name.to_string(), bytes);
        Ok(())
    }
}
