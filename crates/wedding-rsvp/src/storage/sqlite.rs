//! `SQLite`-backed item storage.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use super::{schema, StorageBackend};
use crate::error::{Error, Result};

/// On-device storage engine.
///
/// Holds string items in a single `SQLite` table, one row per key.
#[derive(Debug)]
pub struct SqliteStorage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStorage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        schema::initialize(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let item_count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            item_count,
            db_size_bytes,
        })
    }
}

impl StorageBackend for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value],
        )?;
        debug!("Stored item {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM local_storage WHERE key = ?1", [key])?;
        debug!("Removed item {} ({} rows)", key, affected);
        Ok(())
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of stored items.
    pub item_count: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> SqliteStorage {
        SqliteStorage::open_in_memory().expect("failed to create test storage")
    }

    #[test]
    fn test_open_in_memory() {
        assert!(SqliteStorage::open_in_memory().is_ok());
    }

    #[test]
    fn test_set_and_get() {
        let mut storage = create_test_storage();
        storage.set_item("greeting", "Hello, world!").unwrap();

        assert_eq!(
            storage.get_item("greeting").unwrap().as_deref(),
            Some("Hello, world!")
        );
    }

    #[test]
    fn test_get_missing() {
        let storage = create_test_storage();
        assert_eq!(storage.get_item("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut storage = create_test_storage();
        storage.set_item("k", "first").unwrap();
        storage.set_item("k", "second").unwrap();

        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("second"));
        assert_eq!(storage.stats().unwrap().item_count, 1);
    }

    #[test]
    fn test_remove() {
        let mut storage = create_test_storage();
        storage.set_item("k", "v").unwrap();
        storage.remove_item("k").unwrap();

        assert_eq!(storage.get_item("k").unwrap(), None);
        assert!(storage.remove_item("k").is_ok());
    }

    #[test]
    fn test_unicode_value() {
        let mut storage = create_test_storage();
        storage.set_item("k", "Zoë & José — 🎉").unwrap();

        assert_eq!(
            storage.get_item("k").unwrap().as_deref(),
            Some("Zoë & José — 🎉")
        );
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();
        assert_eq!(stats.item_count, 0);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_open_file_based_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rsvps.db");

        {
            let mut storage = SqliteStorage::open(&db_path).unwrap();
            storage.set_item("k", "kept").unwrap();
            assert_eq!(storage.path(), db_path);
        }

        let storage = SqliteStorage::open(&db_path).unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("kept"));
        assert!(storage.stats().unwrap().db_size_bytes > 0);
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let nested_path = dir.path().join("nested/deeper/rsvps.db");

        let storage = SqliteStorage::open(&nested_path).unwrap();
        assert!(nested_path.exists());
        drop(storage);
    }
}
