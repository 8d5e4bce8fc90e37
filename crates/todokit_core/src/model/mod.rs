//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep the serde shapes aligned with the persisted blob schema.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deadlines carry either a calendar date or the explicit sentinel;
//!   string handling stays at the wire boundary.

pub mod deadline;
pub mod task;
