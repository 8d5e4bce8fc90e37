use chrono::NaiveDate;
use std::sync::Arc;
use todokit_core::{Deadline, FixedClock, MemoryGateway, TaskId, TaskStore};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn empty_store() -> TaskStore {
    TaskStore::open(
        Arc::new(MemoryGateway::new()),
        Arc::new(FixedClock(date(2025, 3, 10))),
    )
}

#[test]
fn add_task_appends_with_defaults() {
    let mut store = empty_store();

    let task = store.add_task("Buy milk", Deadline::None).unwrap();
    assert_eq!(task.text, "Buy milk");
    assert_eq!(task.deadline, Deadline::None);
    assert!(!task.completed);
    assert_eq!(store.len(), 1);
}

#[test]
fn add_task_rejects_whitespace_only_text() {
    let mut store = empty_store();

    assert!(store.add_task("", Deadline::None).is_none());
    assert!(store.add_task("   \t", Deadline::None).is_none());
    assert!(store.is_empty());
}

#[test]
fn add_task_keeps_text_untrimmed() {
    let mut store = empty_store();

    let task = store.add_task("  padded  ", Deadline::None).unwrap();
    assert_eq!(task.text, "  padded  ");
}

#[test]
fn list_length_equals_number_of_non_empty_adds() {
    let mut store = empty_store();

    store.add_task("one", Deadline::None);
    store.add_task("  ", Deadline::None);
    store.add_task("two", Deadline::On(date(2025, 5, 1)));
    store.add_task("", Deadline::None);
    store.add_task("three", Deadline::None);

    assert_eq!(store.len(), 3);
}

#[test]
fn delete_task_is_idempotent() {
    let mut store = empty_store();
    store.add_task("keep", Deadline::None);
    let id = store.add_task("drop", Deadline::None).unwrap().id.clone();

    assert!(store.delete_task(&id));
    let remaining: Vec<String> = store.tasks().iter().map(|t| t.text.clone()).collect();

    assert!(!store.delete_task(&id));
    assert_eq!(
        store.tasks().iter().map(|t| t.text.clone()).collect::<Vec<_>>(),
        remaining
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn delete_unknown_id_is_a_no_op() {
    let mut store = empty_store();
    store.add_task("only", Deadline::None);

    assert!(!store.delete_task(&TaskId::from("no-such-id")));
    assert_eq!(store.len(), 1);
}

#[test]
fn toggle_twice_restores_original_flag() {
    let mut store = empty_store();
    let id = store.add_task("flip me", Deadline::None).unwrap().id.clone();

    assert!(store.toggle_completion(&id).unwrap().completed);
    assert!(!store.toggle_completion(&id).unwrap().completed);
}

#[test]
fn toggle_unknown_id_is_a_no_op() {
    let mut store = empty_store();
    store.add_task("only", Deadline::None);

    assert!(store.toggle_completion(&TaskId::from("missing")).is_none());
    assert!(!store.tasks()[0].completed);
}

#[test]
fn edit_overwrites_text_and_keeps_deadline_when_none_given() {
    let mut store = empty_store();
    let id = store
        .add_task("Pay rent", Deadline::On(date(2025, 3, 5)))
        .unwrap()
        .id
        .clone();

    let edited = store.edit_task(&id, "Updated", None).unwrap();
    assert_eq!(edited.text, "Updated");
    assert_eq!(edited.deadline, Deadline::On(date(2025, 3, 5)));
}

#[test]
fn edit_replaces_deadline_when_given() {
    let mut store = empty_store();
    let id = store
        .add_task("move it", Deadline::On(date(2025, 3, 5)))
        .unwrap()
        .id
        .clone();

    let edited = store
        .edit_task(&id, "move it", Some(date(2025, 6, 1)))
        .unwrap();
    assert_eq!(edited.deadline, Deadline::On(date(2025, 6, 1)));
}

#[test]
fn edit_text_always_overwrites_even_to_empty() {
    let mut store = empty_store();
    let id = store.add_task("original", Deadline::None).unwrap().id.clone();

    let edited = store.edit_task(&id, "", None).unwrap();
    assert_eq!(edited.text, "");
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_unknown_id_is_a_no_op() {
    let mut store = empty_store();
    store.add_task("only", Deadline::None);

    assert!(store
        .edit_task(&TaskId::from("missing"), "x", None)
        .is_none());
    assert_eq!(store.tasks()[0].text, "only");
}

#[test]
fn sort_orders_by_date_and_pushes_undated_to_the_tail() {
    let mut store = empty_store();
    store.add_task("Pay rent", Deadline::On(date(2025, 3, 5)));
    store.add_task("Call mom", Deadline::None);
    store.add_task("Renew passport", Deadline::On(date(2025, 1, 1)));

    store.sort_by_deadline();

    let order: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, ["Renew passport", "Pay rent", "Call mom"]);
}

#[test]
fn sort_keeps_relative_order_of_undated_tasks() {
    let mut store = empty_store();
    store.add_task("undated A", Deadline::None);
    store.add_task("dated", Deadline::On(date(2025, 2, 2)));
    store.add_task("undated B", Deadline::None);
    store.add_task("undated C", Deadline::None);

    store.sort_by_deadline();

    let order: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, ["dated", "undated A", "undated B", "undated C"]);
}

#[test]
fn sort_is_idempotent() {
    let mut store = empty_store();
    store.add_task("b", Deadline::On(date(2025, 4, 4)));
    store.add_task("none", Deadline::None);
    store.add_task("a", Deadline::On(date(2025, 4, 1)));

    store.sort_by_deadline();
    let first: Vec<String> = store.tasks().iter().map(|t| t.text.clone()).collect();

    store.sort_by_deadline();
    let second: Vec<String> = store.tasks().iter().map(|t| t.text.clone()).collect();

    assert_eq!(first, second);
}

#[test]
fn insertion_order_is_stable_until_sort_is_invoked() {
    let mut store = empty_store();
    store.add_task("z-last date", Deadline::On(date(2030, 1, 1)));
    store.add_task("a-early date", Deadline::On(date(2020, 1, 1)));

    let id = store.tasks()[0].id.clone();
    store.toggle_completion(&id);
    store.edit_task(&id, "z-last date (edited)", None);

    let order: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(order, ["z-last date (edited)", "a-early date"]);
}

#[test]
fn deadline_classification_uses_injected_clock() {
    let store = TaskStore::open(
        Arc::new(MemoryGateway::new()),
        Arc::new(FixedClock(date(2025, 3, 10))),
    );

    let yesterday = Deadline::On(date(2025, 3, 9));
    let today = Deadline::On(date(2025, 3, 10));
    let tomorrow = Deadline::On(date(2025, 3, 11));

    assert!(store.is_past_deadline(&yesterday));
    assert!(!store.is_past_deadline(&today));
    assert!(!store.is_past_deadline(&tomorrow));

    assert!(store.is_today(&today));
    assert!(!store.is_today(&yesterday));
    assert!(!store.is_today(&Deadline::None));
    assert!(!store.is_past_deadline(&Deadline::None));
}
