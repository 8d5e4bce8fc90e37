use chrono::NaiveDate;
use todokit_core::{Deadline, Task, TaskId, NO_DEADLINE_SENTINEL};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task {
        id: TaskId::from("1714502400000"),
        text: "Pay rent".to_string(),
        deadline: Deadline::On(date(2025, 3, 5)),
        completed: false,
    };

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], "1714502400000");
    assert_eq!(json["text"], "Pay rent");
    assert_eq!(json["deadline"], "5/3/2025");
    assert_eq!(json["completed"], false);
    // The blob schema carries exactly these four fields and no version tag.
    assert_eq!(json.as_object().unwrap().len(), 4);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn no_deadline_serializes_as_the_fixed_sentinel() {
    let task = Task::new("Buy milk", Deadline::None);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["deadline"], NO_DEADLINE_SENTINEL);
}

#[test]
fn task_list_round_trip_preserves_fields_and_order() {
    let tasks = vec![
        Task::new("first", Deadline::On(date(2025, 1, 2))),
        Task {
            completed: true,
            ..Task::new("second", Deadline::None)
        },
        Task::new("third", Deadline::On(date(2024, 12, 31))),
    ];

    let blob = serde_json::to_string(&tasks).unwrap();
    let decoded: Vec<Task> = serde_json::from_str(&blob).unwrap();

    assert_eq!(decoded, tasks);
}

#[test]
fn legacy_epoch_millis_ids_still_deserialize() {
    // Earlier app versions generated ids from the current timestamp; the
    // id stays an opaque string on the wire so those blobs keep loading.
    let blob = r#"[
        {"id":"1700000000001","text":"old task","deadline":"Brak terminu","completed":true}
    ]"#;

    let decoded: Vec<Task> = serde_json::from_str(blob).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].id.as_str(), "1700000000001");
    assert_eq!(decoded[0].deadline, Deadline::None);
    assert!(decoded[0].completed);
}

#[test]
fn malformed_deadline_in_blob_fails_decoding() {
    let blob = r#"[{"id":"a","text":"t","deadline":"next tuesday","completed":false}]"#;

    assert!(serde_json::from_str::<Vec<Task>>(blob).is_err());
}

#[test]
fn generated_ids_are_unique() {
    let a = Task::new("x", Deadline::None);
    let b = Task::new("x", Deadline::None);
    assert_ne!(a.id, b.id);
}
