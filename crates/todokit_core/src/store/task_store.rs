//! Task list state and mutation operations.
//!
//! # Responsibility
//! - Own the in-memory task list and every user-facing mutation.
//! - Synchronize each mutation to the persistence gateway.
//!
//! # Invariants
//! - Task ids are unique within the list at all times.
//! - List order is stable except across `sort_by_deadline`.
//! - Mutations update in-memory state synchronously; the gateway write
//!   settles later and never rolls the mutation back.

use crate::clock::Clock;
use crate::model::deadline::Deadline;
use crate::model::task::{Task, TaskId};
use crate::storage::{PersistenceGateway, TASKS_KEY};
use crate::store::writer::PersistWriter;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::sync::Arc;

/// Owner of the task list and its persistence lifecycle.
///
/// Constructed once at application start with an injected gateway and
/// clock, then passed by reference to consumers. All methods assume one
/// logical caller thread; hosts that fan in from several threads wrap the
/// store in their own lock.
pub struct TaskStore {
    tasks: Vec<Task>,
    clock: Arc<dyn Clock>,
    writer: PersistWriter,
}

impl TaskStore {
    /// Opens the store, seeding in-memory state from the persisted blob.
    ///
    /// An absent key, a failed read, or an undecodable blob all degrade to
    /// an empty list; the failure is logged, never surfaced. This read
    /// happens once per store lifetime.
    pub fn open(gateway: Arc<dyn PersistenceGateway>, clock: Arc<dyn Clock>) -> Self {
        let tasks = load_tasks(&*gateway);
        Self {
            tasks,
            clock,
            writer: PersistWriter::spawn(gateway),
        }
    }

    /// Read view of the list, in current order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Appends a new task with the given text and deadline.
    ///
    /// Whitespace-only text is rejected as a silent no-op (`None`). The
    /// text is stored as entered, untrimmed.
    pub fn add_task(&mut self, text: &str, deadline: Deadline) -> Option<&Task> {
        if text.trim().is_empty() {
            return None;
        }

        self.tasks.push(Task::new(text, deadline));
        self.persist();
        self.tasks.last()
    }

    /// Removes the task with the given id. Unknown ids are a no-op.
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Flips the completion flag on the matching task. Unknown ids are a
    /// no-op.
    pub fn toggle_completion(&mut self, id: &TaskId) -> Option<&Task> {
        let index = self.index_of(id)?;
        self.tasks[index].completed = !self.tasks[index].completed;
        self.persist();
        Some(&self.tasks[index])
    }

    /// Rewrites the matching task.
    ///
    /// `new_text` always overwrites the stored text, even when it shrinks
    /// to nothing; `new_deadline` replaces the deadline only when given,
    /// otherwise the prior deadline is kept. Unknown ids are a no-op.
    pub fn edit_task(
        &mut self,
        id: &TaskId,
        new_text: &str,
        new_deadline: Option<NaiveDate>,
    ) -> Option<&Task> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        task.text = new_text.to_string();
        if let Some(date) = new_deadline {
            task.deadline = Deadline::On(date);
        }
        self.persist();
        Some(&self.tasks[index])
    }

    /// Reorders the list: deadlined tasks ascending by calendar date,
    /// then every no-deadline task in its prior relative order.
    ///
    /// Deliberately not a stable full-list sort: no-deadline tasks are
    /// always pushed to the tail, regardless of where they sat relative to
    /// deadlined tasks. Ties between equal dates keep no particular order.
    pub fn sort_by_deadline(&mut self) {
        let (mut dated, undated): (Vec<Task>, Vec<Task>) = self
            .tasks
            .drain(..)
            .partition(|task| task.deadline.date().is_some());

        dated.sort_by_key(|task| task.deadline.date());

        self.tasks = dated;
        self.tasks.extend(undated);
        // Order is part of persisted state, so sorting saves too.
        self.persist();
    }

    /// True iff the deadline falls on the clock's current date.
    pub fn is_today(&self, deadline: &Deadline) -> bool {
        deadline.is_on(self.clock.today())
    }

    /// True iff the deadline's date is strictly before the clock's current
    /// date. A deadline due today is not past.
    pub fn is_past_deadline(&self, deadline: &Deadline) -> bool {
        deadline.is_before(self.clock.today())
    }

    /// Blocks until every persistence write triggered so far has settled.
    ///
    /// Intended for host lifecycle hooks (app backgrounded/terminating);
    /// normal mutations never wait on this.
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn persist(&self) {
        match serde_json::to_string(&self.tasks) {
            Ok(blob) => self.writer.enqueue(blob),
            Err(err) => {
                error!(
                    "event=tasks_persist module=store status=error error_code=serialize_failed error={err}"
                );
            }
        }
    }
}

fn load_tasks(gateway: &dyn PersistenceGateway) -> Vec<Task> {
    let blob = match gateway.read(TASKS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=tasks_load module=store status=ok count=0 source=empty");
            return Vec::new();
        }
        Err(err) => {
            warn!(
                "event=tasks_load module=store status=error error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Task>>(&blob) {
        Ok(tasks) => {
            info!(
                "event=tasks_load module=store status=ok count={} source=blob",
                tasks.len()
            );
            tasks
        }
        Err(err) => {
            // Treated like a failed read: a blob we cannot decode is worth
            // less than a clean empty list.
            warn!(
                "event=tasks_load module=store status=error error_code=decode_failed error={err}"
            );
            Vec::new()
        }
    }
}
