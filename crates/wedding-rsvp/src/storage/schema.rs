//! `SQLite` schema for the on-device store.
//!
//! The store mirrors a browser's local storage: a flat table of string
//! items keyed by name. The layout version lives in `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// Layout version written by this build.
pub const SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the item table.
pub const CREATE_ITEMS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS local_storage (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Create the item table and stamp the layout version.
///
/// A fresh database reports version 0 and is stamped with
/// [`SCHEMA_VERSION`]. Opening a database from a newer build is refused
/// rather than guessed at.
///
/// # Errors
///
/// Returns [`Error::SchemaTooNew`] for a newer layout, or a query error.
pub fn initialize(conn: &Connection) -> Result<()> {
    let found = user_version(conn)?;
    if found > SCHEMA_VERSION {
        return Err(Error::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    conn.execute(CREATE_ITEMS_TABLE, [])?;
    if found < SCHEMA_VERSION {
        set_user_version(conn, SCHEMA_VERSION)?;
        debug!(from = found, to = SCHEMA_VERSION, "Stamped schema version");
    }
    Ok(())
}

fn user_version(conn: &Connection) -> Result<i32> {
    Ok(conn.query_row("PRAGMA user_version", [], |row| row.get(0))?)
}

fn set_user_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute_batch(&format!("PRAGMA user_version = {version}"))?;
    Ok(())
}
