use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StoreError;

/// Per-document critical sections for load/mutate/save cycles.
///
/// Lazily creates one mutex per document name and returns the same `Arc`
/// for repeated lookups. Only serializes callers inside this process.
#[derive(Default)]
pub struct DocumentLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get (or create) the lock for a document.
    pub fn get_lock(&self, name: &str) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| StoreError::LockPoisoned(name.to_string()))?;
        Ok(locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }

    /// Run `f` while holding the lock for document `name`.
    pub fn with_lock<T, E>(&self, name: &str, f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let lock = self.get_lock(name)?;
        let _guard = lock
            .lock()
            .map_err(|_| StoreError::LockPoisoned(name.to_string()))?;
        f()
    }
}
