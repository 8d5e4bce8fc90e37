//! Core domain logic for the TodoKit mobile to-do list.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::deadline::{Deadline, DeadlineParseError, NO_DEADLINE_SENTINEL};
pub use model::task::{Task, TaskId};
pub use storage::{
    MemoryGateway, PersistenceGateway, SqliteGateway, StorageError, StorageResult, TASKS_KEY,
};
pub use store::task_store::TaskStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
