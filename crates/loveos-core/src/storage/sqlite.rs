//! SQLite-backed progress store.
//!
//! A single key-value table in `~/.config/loveos/loveos.db`, playing the
//! role of per-browser local storage.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, ProgressStore};
use crate::error::StorageError;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `<data_dir>/loveos.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Self::open_at(dir.join("loveos.db"))
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut keys = Vec::new();
        for key in rows {
            keys.push(key?);
        }
        Ok(keys)
    }
}

impl ProgressStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressState;

    #[test]
    fn kv_roundtrip() {
        let mut store = SqliteStore::open_memory().unwrap();
        assert!(store.read("test").unwrap().is_none());
        store.write("test", "hello").unwrap();
        assert_eq!(store.read("test").unwrap().as_deref(), Some("hello"));
        store.write("test", "again").unwrap();
        assert_eq!(store.read("test").unwrap().as_deref(), Some("again"));
        store.remove("test").unwrap();
        assert!(store.read("test").unwrap().is_none());
    }

    #[test]
    fn progress_roundtrip() {
        let mut store = SqliteStore::open_memory().unwrap();
        let state = ProgressState {
            why_done: true,
            heart_done: false,
            code_done: true,
            questions_done: false,
        };
        store.save("loveos_progress_v1_1", &state).unwrap();
        assert_eq!(store.load("loveos_progress_v1_1"), state);
        assert_eq!(store.load("loveos_progress_v1_2"), ProgressState::default());
    }

    #[test]
    fn corrupt_row_loads_fresh() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.write("k", "{{{").unwrap();
        assert_eq!(store.load("k"), ProgressState::default());
    }

    #[test]
    fn persists_across_connections() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("loveos.db");
        {
            let mut store = SqliteStore::open_at(&path).unwrap();
            store.write("a", "1").unwrap();
        }
        let store = SqliteStore::open_at(&path).unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.keys().unwrap(), vec!["a".to_string()]);
    }
}
