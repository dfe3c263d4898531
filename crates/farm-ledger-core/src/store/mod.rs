//! Key-value storage layer for farm-ledger.
//!
//! Collections are persisted as whole JSON documents under fixed keys, the
//! layout a browser's local storage would hold. Backends only need to move
//! strings in and out; everything typed lives in [`crate::repository`].

mod memory;
mod migrations;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use migrations::{ensure_schema, read_schema_version, CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};
pub use schema::SCHEMA;
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use thiserror::Error;
use tracing::warn;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage capacity exceeded writing '{key}': {required} bytes needed, capacity is {capacity}")]
    CapacityExceeded {
        key: String,
        required: usize,
        capacity: usize,
    },

    #[error("invalid schema version value: {0}")]
    InvalidSchemaVersion(String),

    #[error("unsupported schema version {found} (newest known is {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    #[error("update patch must be a JSON object")]
    InvalidPatch,

    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A string-to-string store with whole-value reads and writes.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if it was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`. Returns whether it existed.
    fn remove(&mut self, key: &str) -> StoreResult<bool>;

    /// All keys currently present, sorted.
    fn keys(&self) -> StoreResult<Vec<String>>;

    /// Whether `key` holds a value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }

    fn contains(&self, key: &str) -> StoreResult<bool> {
        (**self).contains(key)
    }
}

/// Bytes an entry occupies against the capacity ceiling.
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Reject a write that would push usage past `capacity`.
///
/// `used` is the current total, `replaced` the size of the entry being
/// overwritten (0 for a new key).
pub(crate) fn check_capacity(
    capacity: Option<usize>,
    used: usize,
    replaced: usize,
    key: &str,
    value: &str,
) -> StoreResult<()> {
    let Some(capacity) = capacity else {
        return Ok(());
    };

    let required = used.saturating_sub(replaced) + entry_size(key, value);
    if required > capacity {
        warn!(
            key,
            required, capacity, "rejecting write: storage capacity exceeded"
        );
        return Err(StoreError::CapacityExceeded {
            key: key.to_string(),
            required,
            capacity,
        });
    }
    Ok(())
}
