//! Integration tests for capture -> triage -> scheduling workflows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use parapilot_core::{
    extract_task, free_slots, parse_tasks, select_due_soon, triage, InMemoryItemStore, Interval,
    Priority, StoredItem, TaskExtractor, TriageConfig,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 20, 9, 0, 0).unwrap()
}

#[test]
fn test_high_priority_capture_with_weekday() {
    let task = TaskExtractor::new().extract_at("Finish project proposal by Friday high priority", now());

    assert_eq!(task.priority, Priority::High);
    assert!(task.title.contains("Finish project proposal"));
    assert!(!task.title.contains("by"));
    assert!(!task.title.contains("Friday"));
    assert!(!task.title.contains("high priority"));
}

#[test]
fn test_duration_capture() {
    let task = TaskExtractor::new().extract_at("Schedule meeting prep for Thursday 2pm for 1 hour", now());
    assert_eq!(task.duration_minutes, Some(60));
}

#[test]
fn test_tomorrow_capture() {
    let task = TaskExtractor::new().extract_at("Call mom tomorrow", now());
    assert_eq!(task.due_at, Some(now() + Duration::days(1)));
}

#[test]
fn test_extract_task_uses_wall_clock() {
    let before = Utc::now();
    let task = extract_task("Call mom tomorrow");
    let after = Utc::now();

    let due = task.due_at.expect("tomorrow resolves to a due date");
    assert!(due >= before + Duration::days(1));
    assert!(due <= after + Duration::days(1));
    assert!(!task.id.is_empty());
}

#[test]
fn test_capture_links_to_active_project() {
    let store = InMemoryItemStore::from_items(vec![StoredItem {
        id: "proj-42".into(),
        user_id: "user-1".into(),
        title: "Kitchen Renovation".into(),
        active: true,
    }]);

    let extracted = TaskExtractor::new().extract_and_link(
        "Order renovation tiles next week 30 min",
        "user-1",
        &store,
        now(),
    );

    assert_eq!(extracted.task.title, "Order renovation tiles");
    assert_eq!(extracted.task.duration_minutes, Some(30));
    assert_eq!(extracted.task.due_at, Some(now() + Duration::days(7)));
    assert_eq!(extracted.linked_item.clone().map(|i| i.id).as_deref(), Some("proj-42"));
    assert!(extracted.is_actionable());
}

#[test]
fn test_captures_feed_triage() {
    let extractor = TaskExtractor::new();
    let captures = [
        "Pay rent tomorrow urgent",
        "Prepare slides tomorrow 2 hours important",
        "Reply to landlord tomorrow 10 min",
        "Water plants tomorrow low priority 5 min",
        "Write annual report tomorrow 4 hours",
        "Book dentist tomorrow 15 min",
    ];
    let tasks: Vec<_> = captures
        .iter()
        .map(|text| extractor.extract_at(text, now()))
        .collect();

    let due_soon = select_due_soon(&tasks, now(), 24);
    assert_eq!(due_soon.len(), captures.len());

    let result = triage(&due_soon, &TriageConfig::default());
    let suggestions = result.suggestions.expect("six tasks need triage");

    let title_of = |id: &String| {
        tasks
            .iter()
            .find(|t| &t.id == id)
            .map(|t| t.title.clone())
            .unwrap()
    };
    let keep: Vec<String> = suggestions.keep.iter().map(title_of).collect();
    let defer: Vec<String> = suggestions.defer.iter().map(title_of).collect();
    let reconsider: Vec<String> = suggestions.reconsider.iter().map(title_of).collect();

    assert_eq!(keep, vec!["Pay rent", "Prepare slides", "Reply to landlord"]);
    assert_eq!(defer, vec!["Book dentist"]);
    assert_eq!(reconsider, vec!["Write annual report", "Water plants"]);
}

#[test]
fn test_triage_from_json_list() {
    let json = r#"[
        {"id": "a", "title": "A", "priority": "urgent"},
        {"id": "b", "title": "B", "priority": "high", "estimated_duration_minutes": 10},
        {"id": "c", "title": "C", "priority": "medium"},
        {"id": "d", "title": "D", "priority": "mystery", "duration_minutes": 200}
    ]"#;
    let tasks = parse_tasks(json).unwrap();
    let result = triage(&tasks, &TriageConfig::default());
    let suggestions = result.suggestions.unwrap();

    assert_eq!(suggestions.keep, vec!["a", "b", "c"]);
    assert!(suggestions.defer.is_empty());
    assert_eq!(suggestions.reconsider, vec!["d"]);
}

#[test]
fn test_free_slots_documented_example() {
    let at = |h: u32| Utc.with_ymd_and_hms(2025, 10, 21, h, 0, 0).unwrap();
    let busy = vec![Interval::new(at(9), at(10)), Interval::new(at(12), at(13))];

    let slots = free_slots(at(8), at(17), &busy, 60).unwrap();
    assert_eq!(
        slots,
        vec![
            Interval::new(at(8), at(9)),
            Interval::new(at(10), at(12)),
            Interval::new(at(13), at(17)),
        ]
    );
}

#[test]
fn test_tasks_without_ids_are_rejected_before_triage() {
    let json = r#"[
        {"title": "A", "priority": "urgent"},
        {"title": "B", "priority": "high"},
        {"title": "C"},
        {"title": "D"},
        {"title": "E", "priority": "low"}
    ]"#;
    let err = parse_tasks(json).unwrap_err();
    assert!(err.to_string().contains("index 0"));
}
