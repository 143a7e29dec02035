use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use super::{StoreResult, ensure_parent_dir};

/// Key/value table backing one session.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the session file at `path`, or a private in-memory database.
    pub fn open(path: Option<&Path>) -> StoreResult<Self> {
        let conn = match path {
            Some(path) => {
                ensure_parent_dir(path)?;
                Connection::open(path)?
            }
            None => Connection::open_in_memory()?,
        };
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS session_entries (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get_entry(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM session_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite `key`, stamping the write time.
    pub fn put_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO session_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))",
            params![key, value],
        )?;
        Ok(())
    }

    /// Number of stored entries.
    pub fn entry_count(&self) -> StoreResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM session_entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_overwrites_existing_key() {
        let db = Database::open(None).unwrap();

        db.put_entry("k", "first").unwrap();
        db.put_entry("k", "second").unwrap();

        assert_eq!(db.get_entry("k").unwrap().as_deref(), Some("second"));
        assert_eq!(db.entry_count().unwrap(), 1);
    }

    #[test]
    fn missing_key_reads_none() {
        let db = Database::open(None).unwrap();

        assert_eq!(db.get_entry("absent").unwrap(), None);
        assert_eq!(db.entry_count().unwrap(), 0);
    }

    #[test]
    fn reopening_file_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/session.db");

        Database::open(Some(&path))
            .unwrap()
            .put_entry("k", "v")
            .unwrap();

        let reopened = Database::open(Some(&path)).unwrap();
        assert_eq!(reopened.get_entry("k").unwrap().as_deref(), Some("v"));
    }
}
