//! Task store and persistence synchronization.
//!
//! # Responsibility
//! - Orchestrate task-list mutations and their write-behind persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod task_store;
mod writer;
