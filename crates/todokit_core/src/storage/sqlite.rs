//! SQLite-backed key/blob gateway.
//!
//! # Responsibility
//! - Durably persist blobs in the `kv_store` table.
//!
//! # Invariants
//! - The connection has migrations applied before first use (enforced by
//!   constructing through `db::open_db`).
//! - `write` upserts; `updated_at` tracks the last successful write.

use super::{PersistenceGateway, StorageResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;

/// On-device durable gateway over a single SQLite file.
pub struct SqliteGateway {
    // The writer thread and the startup read share this gateway, and
    // rusqlite connections are not Sync.
    conn: Mutex<Connection>,
}

impl SqliteGateway {
    /// Opens (and migrates) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db(path)?),
        })
    }

    /// Opens an in-memory database, for tests and ephemeral hosts.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: Mutex::new(open_db_in_memory()?),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means a panic mid-statement; the connection
        // itself is still usable for subsequent statements.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceGateway for SqliteGateway {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let conn = self.lock();
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}
