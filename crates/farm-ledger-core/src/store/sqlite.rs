//! SQLite-backed store.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::schema::SCHEMA;
use super::{check_capacity, entry_size, KeyValueStore, StoreError, StoreResult};

/// Durable store keeping every collection as one row of `kv_entries`.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    capacity_bytes: Option<usize>,
}

impl SqliteStore {
    /// Open database at path, creating it and its parent directories if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| StoreError::DirectoryCreate {
                    path: PathBuf::from(parent),
                    source,
                })?;
            }
        }

        debug!("Opening farm database at {}", path.display());
        let conn = Connection::open(path)?;
        let store = Self::initialize(conn)?;
        info!("Farm database opened at {}", path.display());
        Ok(store)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            capacity_bytes: None,
        })
    }

    /// Refuse writes that would push usage past `bytes` (`None` = unlimited).
    pub fn with_capacity(mut self, bytes: Option<usize>) -> Self {
        self.capacity_bytes = bytes;
        self
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> StoreResult<usize> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(CAST(key AS BLOB)) + LENGTH(CAST(value AS BLOB))), 0) FROM kv_entries",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(total).unwrap_or(usize::MAX))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv_entries WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(Into::into)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        if self.capacity_bytes.is_some() {
            let replaced = self
                .get(key)?
                .map(|old| entry_size(key, &old))
                .unwrap_or(0);
            check_capacity(self.capacity_bytes, self.used_bytes()?, replaced, key, value)?;
        }

        self.conn.execute(
            r#"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        debug!(key, bytes = value.len(), "stored entry");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?", [key])?;
        Ok(rows_affected > 0)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv_entries ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        assert!(SqliteStore::open_in_memory().is_ok());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("animals", r#"[{"id":"1"}]"#).unwrap();

        assert_eq!(
            store.get("animals").unwrap(),
            Some(r#"[{"id":"1"}]"#.to_string())
        );
        assert_eq!(store.get("visitors").unwrap(), None);
    }

    #[test]
    fn test_upsert_replaces_value() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "one").unwrap();
        store.set("k", "two").unwrap();

        assert_eq!(store.get("k").unwrap(), Some("two".into()));
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }

    #[test]
    fn test_used_bytes_counts_utf8() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "é").unwrap();
        assert_eq!(store.used_bytes().unwrap(), 1 + "é".len());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut store = SqliteStore::open_in_memory().unwrap().with_capacity(Some(10));
        store.set("k", "12345").unwrap();

        let result = store.set("other", "12345");
        assert!(matches!(result, Err(StoreError::CapacityExceeded { .. })));
        assert_eq!(store.get("other").unwrap(), None);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("farm.db");

        let mut store = SqliteStore::open(&path).unwrap();
        store.set("k", "v").unwrap();
        drop(store);

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("k").unwrap(), Some("v".into()));
    }

    #[test]
    fn test_remove() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.set("k", "v").unwrap();

        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
        assert!(store.keys().unwrap().is_empty());
    }
}
