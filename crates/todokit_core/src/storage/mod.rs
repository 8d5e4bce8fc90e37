//! Persistence gateway contracts and backends.
//!
//! # Responsibility
//! - Define the key/blob contract the task store persists through.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - The whole task list is one blob under one fixed key; there is no
//!   partial or incremental persistence.
//! - Gateways are safe to call from the background writer thread.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryGateway;
pub use sqlite::SqliteGateway;

/// Fixed namespace key for the serialized task list.
pub const TASKS_KEY: &str = "tasks";

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level persistence error.
#[derive(Debug)]
pub enum StorageError {
    Db(crate::db::DbError),
    /// Injected or backend-specific failure, carried as a message.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<crate::db::DbError> for StorageError {
    fn from(value: crate::db::DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(crate::db::DbError::Sqlite(value))
    }
}

/// Key/blob storage consumed by the task store.
///
/// Contract: `read` returns `Ok(None)` for an absent key; `write` replaces
/// the previous blob atomically from the caller's point of view.
pub trait PersistenceGateway: Send + Sync {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}
