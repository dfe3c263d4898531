//! In-memory store.

use std::collections::BTreeMap;

use super::{check_capacity, entry_size, KeyValueStore, StoreResult};

/// Map-backed store. Nothing survives the process; used for tests and for
/// hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    capacity_bytes: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a capacity ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that refuses writes past `bytes`.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity_bytes: Some(bytes),
        }
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let replaced = self
            .entries
            .get(key)
            .map(|old| entry_size(key, old))
            .unwrap_or(0);
        check_capacity(self.capacity_bytes, self.used_bytes(), replaced, key, value)?;

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}
