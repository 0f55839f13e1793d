//! Shared plugin context

use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Mutable state shared between a kernel and its plugins.
///
/// The key set is agreed by convention between cooperating plugins; the
/// kernel itself never interprets the values. Every mutation bumps a
/// revision counter, which the kernel compares against the revision seen at
/// the last successful `initialize()` to decide whether re-initialization
/// is required.
pub struct SharedContext {
    values: RwLock<Map<String, Value>>,
    revision: AtomicU64,
}

impl SharedContext {
    pub(crate) fn new() -> Self {
        Self {
            values: RwLock::new(Map::new()),
            revision: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Map<String, Value>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Map<String, Value>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch a value by key.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Insert or replace a value, bumping the context revision.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.write().insert(key.into(), value);
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Remove a value, bumping the context revision.
    pub fn remove(&self, key: &str) -> Option<Value> {
        let removed = self.write().remove(key);
        self.revision.fetch_add(1, Ordering::SeqCst);
        removed
    }

    /// Copy of the current key/value map.
    pub fn snapshot(&self) -> Map<String, Value> {
        self.read().clone()
    }

    /// Monotonic counter incremented on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for SharedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedContext")
            .field("keys", &self.read().keys().collect::<Vec<_>>())
            .field("revision", &self.revision())
            .finish()
    }
}
