//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Keep error semantics simple for the UI: envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The process owns exactly one task store; all calls funnel through it.
//! - Deadline strings cross the boundary in `D/M/YYYY` wire form; the
//!   empty string means "no deadline" on add and "keep prior" on edit.

use todokit_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Deadline, SqliteGateway, SystemClock, TaskId, TaskStore, NO_DEADLINE_SENTINEL,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const STORE_DB_FILE_NAME: &str = "todokit.sqlite3";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static STORE: OnceLock<Result<Mutex<TaskStore>, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the store database directory before first task operation.
///
/// The shell calls this at startup with its app-documents directory. When
/// omitted, the store falls back to `TODOKIT_DB_PATH` or the OS temp dir,
/// which only suits tests and throwaway sessions.
///
/// # FFI contract
/// - Sync call; opens the database and performs the one-time task load.
/// - Never panics; returns empty string on success and error message on
///   failure (including a conflicting earlier initialization).
#[flutter_rust_bridge::frb(sync)]
pub fn init_store(db_dir: String) -> String {
    let trimmed = db_dir.trim();
    if trimmed.is_empty() {
        return "db_dir cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed).join(STORE_DB_FILE_NAME);

    let pinned = STORE_DB_PATH.get_or_init(|| requested.clone());
    if pinned != &requested {
        return format!(
            "store already initialized at `{}`; refusing to switch to `{}`",
            pinned.display(),
            requested.display()
        );
    }

    match store_handle() {
        Ok(_) => String::new(),
        Err(err) => err,
    }
}

/// One task row shaped for list rendering.
///
/// Carries the classification flags the view needs for row styling, so the
/// Dart side never re-implements date rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task id in string form.
    pub id: String,
    /// Display text as entered.
    pub text: String,
    /// Deadline in `D/M/YYYY` form, or the no-deadline marker.
    pub deadline: String,
    /// Completion flag.
    pub completed: bool,
    /// Deadline falls on the current local date.
    pub is_today: bool,
    /// Deadline date is strictly before the current local date.
    pub is_past_deadline: bool,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the task the operation touched, when one exists.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Lists all tasks in current store order.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Returns an empty list when the store cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn list_tasks() -> Vec<TaskItem> {
    let Ok(store) = lock_store() else {
        return Vec::new();
    };
    store
        .tasks()
        .iter()
        .map(|task| TaskItem {
            id: task.id.to_string(),
            text: task.text.clone(),
            deadline: task.deadline.to_wire(),
            completed: task.completed,
            is_today: store.is_today(&task.deadline),
            is_past_deadline: store.is_past_deadline(&task.deadline),
        })
        .collect()
}

/// Adds a task with optional deadline.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Whitespace-only text is rejected with `ok=false` and no state change.
/// - Malformed deadline strings are rejected with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(text: String, deadline: String) -> TaskActionResponse {
    let deadline = match parse_deadline_argument(&deadline) {
        Ok(parsed) => parsed.unwrap_or(Deadline::None),
        Err(message) => return TaskActionResponse::failure(message),
    };

    match lock_store() {
        Ok(mut store) => match store.add_task(&text, deadline) {
            Some(task) => {
                TaskActionResponse::success("Task added.", Some(task.id.to_string()))
            }
            None => TaskActionResponse::failure("Task text cannot be empty."),
        },
        Err(err) => TaskActionResponse::failure(format!("add_task failed: {err}")),
    }
}

/// Deletes the task with the given id.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Unknown ids report `ok=false` but leave state untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(id: String) -> TaskActionResponse {
    match lock_store() {
        Ok(mut store) => {
            if store.delete_task(&TaskId::from(id.clone())) {
                TaskActionResponse::success("Task deleted.", Some(id))
            } else {
                TaskActionResponse::failure("Task not found.")
            }
        }
        Err(err) => TaskActionResponse::failure(format!("delete_task failed: {err}")),
    }
}

/// Flips the completion flag on the task with the given id.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Unknown ids report `ok=false` but leave state untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_completion(id: String) -> TaskActionResponse {
    match lock_store() {
        Ok(mut store) => match store.toggle_completion(&TaskId::from(id.clone())) {
            Some(task) => {
                let message = if task.completed {
                    "Task completed."
                } else {
                    "Task reopened."
                };
                TaskActionResponse::success(message, Some(id))
            }
            None => TaskActionResponse::failure("Task not found."),
        },
        Err(err) => TaskActionResponse::failure(format!("toggle_completion failed: {err}")),
    }
}

/// Rewrites a task's text and, when given, its deadline.
///
/// `new_deadline` semantics follow the edit dialog: an empty string (or
/// the no-deadline marker) keeps the prior deadline.
///
/// # FFI contract
/// - Sync call; never panics.
/// - Unknown ids report `ok=false` but leave state untouched.
/// - Malformed deadline strings are rejected with `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn edit_task(id: String, new_text: String, new_deadline: String) -> TaskActionResponse {
    let new_deadline = match parse_deadline_argument(&new_deadline) {
        Ok(parsed) => parsed.and_then(|deadline| deadline.date()),
        Err(message) => return TaskActionResponse::failure(message),
    };

    match lock_store() {
        Ok(mut store) => {
            match store.edit_task(&TaskId::from(id.clone()), &new_text, new_deadline) {
                Some(_) => TaskActionResponse::success("Task updated.", Some(id)),
                None => TaskActionResponse::failure("Task not found."),
            }
        }
        Err(err) => TaskActionResponse::failure(format!("edit_task failed: {err}")),
    }
}

/// Reorders the list by deadline, no-deadline tasks last.
///
/// # FFI contract
/// - Sync call; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn sort_by_deadline() -> TaskActionResponse {
    match lock_store() {
        Ok(mut store) => {
            store.sort_by_deadline();
            TaskActionResponse::success("Tasks sorted by deadline.", None)
        }
        Err(err) => TaskActionResponse::failure(format!("sort_by_deadline failed: {err}")),
    }
}

/// Blocks until pending persistence writes have settled.
///
/// Intended for host lifecycle hooks (app backgrounded/terminating).
///
/// # FFI contract
/// - Sync call; may wait on in-flight database writes.
/// - Never panics; returns empty string on success and error message when
///   the store is unavailable.
#[flutter_rust_bridge::frb(sync)]
pub fn flush_store() -> String {
    match lock_store() {
        Ok(store) => {
            store.flush();
            String::new()
        }
        Err(err) => err,
    }
}

/// Parses a deadline argument from the boundary.
///
/// Returns `Ok(None)` for "not provided" shapes (empty string or the
/// no-deadline marker), `Ok(Some(_))` for a parsed deadline, `Err` for
/// malformed input.
fn parse_deadline_argument(value: &str) -> Result<Option<Deadline>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == NO_DEADLINE_SENTINEL {
        return Ok(None);
    }
    match Deadline::parse(trimmed) {
        Ok(deadline) => Ok(Some(deadline)),
        Err(err) => Err(err.to_string()),
    }
}

fn store_handle() -> Result<&'static Mutex<TaskStore>, String> {
    let slot = STORE.get_or_init(|| {
        let db_path = resolve_store_db_path();
        let gateway = SqliteGateway::open(&db_path)
            .map_err(|err| format!("store DB open failed at `{}`: {err}", db_path.display()))?;
        Ok(Mutex::new(TaskStore::open(
            std::sync::Arc::new(gateway),
            std::sync::Arc::new(SystemClock),
        )))
    });
    match slot {
        Ok(store) => Ok(store),
        Err(err) => Err(err.clone()),
    }
}

fn lock_store() -> Result<MutexGuard<'static, TaskStore>, String> {
    let store = store_handle()?;
    Ok(store.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("TODOKIT_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}
