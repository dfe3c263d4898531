//! SQLite schema definition.

/// Database schema for the SQLite backend.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-Value Entries
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_entries (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                         -- JSON document (collection array or scalar)
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_key_is_primary() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?, ?)",
            ["animals", "[]"],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?, ?)",
            ["animals", "[]"],
        );
        assert!(duplicate.is_err());
    }
}
