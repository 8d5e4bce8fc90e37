//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, storage and FFI.
//! - Keep the serde shape identical to the persisted blob schema.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - Wire field names are `id`, `text`, `deadline`, `completed`; there is
//!   no schema version field, so any rename is a breaking change.

use crate::model::deadline::Deadline;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable, opaque task identifier.
///
/// Fresh ids are UUID v4 strings; the wire type stays an opaque string so
/// ids written by earlier app versions (epoch-millisecond strings) keep
/// deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id used for toggle/edit/delete addressing.
    pub id: TaskId,
    /// Display text. Stored as entered; emptiness is enforced at add time.
    pub text: String,
    /// Optional calendar deadline; serialized as its wire string.
    pub deadline: Deadline,
    /// Completion flag, flipped by user action.
    pub completed: bool,
}

impl Task {
    /// Creates a new task with a generated id and `completed = false`.
    pub fn new(text: impl Into<String>, deadline: Deadline) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into(),
            deadline,
            completed: false,
        }
    }
}
