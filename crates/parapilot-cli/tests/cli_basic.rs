//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated HOME and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str], stdin: Option<&str>) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_parapilot"))
        .args(args)
        .env("HOME", home)
        .env("PARAPILOT_ENV", "dev")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    let mut pipe = child.stdin.take().unwrap();
    if let Some(input) = stdin {
        pipe.write_all(input.as_bytes()).unwrap();
    }
    drop(pipe);

    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_extract_prints_task_json() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &["extract", "Finish project proposal by Friday high priority"],
        None,
    );
    assert_eq!(code, 0, "extract failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["task"]["title"], "Finish project proposal");
    assert_eq!(json["task"]["priority"], "high");
    assert_eq!(json["actionable"], true);
    assert!(json["linked_item"].is_null());
}

#[test]
fn test_extract_links_items_file() {
    let home = tempfile::tempdir().unwrap();
    let items = home.path().join("items.json");
    std::fs::write(
        &items,
        r#"[{"id": "p1", "user_id": "local", "title": "Garden makeover"}]"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(
        home.path(),
        &["extract", "Buy garden soil", "--items", items.to_str().unwrap()],
        None,
    );
    assert_eq!(code, 0, "extract with items failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["linked_item"]["id"], "p1");
    assert_eq!(json["actionable"], false);
}

#[test]
fn test_triage_reads_stdin() {
    let home = tempfile::tempdir().unwrap();
    let tasks = r#"[
        {"id": "a", "title": "A", "priority": "urgent"},
        {"id": "b", "title": "B", "priority": "high"},
        {"id": "c", "title": "C", "priority": "medium"},
        {"id": "d", "title": "D", "priority": "low"}
    ]"#;
    let (stdout, _, code) = run_cli(home.path(), &["triage"], Some(tasks));
    assert_eq!(code, 0, "triage failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["needs_reprioritization"], true);
    assert_eq!(json["suggestions"]["keep"], serde_json::json!(["a", "b", "c"]));
    assert_eq!(json["suggestions"]["reconsider"], serde_json::json!(["d"]));
}

#[test]
fn test_triage_rejects_non_list() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["triage"], Some(r#"{"id": "a"}"#));
    assert_ne!(code, 0);
    assert!(stderr.contains("Malformed input"));
}

#[test]
fn test_slots_without_busy_file() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        home.path(),
        &[
            "slots",
            "--start",
            "2025-10-21T08:00:00Z",
            "--end",
            "2025-10-21T17:00:00Z",
            "--duration",
            "60",
        ],
        None,
    );
    assert_eq!(code, 0, "slots failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(1));
}

#[test]
fn test_slots_rejects_negative_duration() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "slots",
            "--start",
            "2025-10-21T08:00:00Z",
            "--end",
            "2025-10-21T17:00:00Z",
            "--duration",
            "-5",
        ],
        None,
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("duration_minutes"));
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "triage.threshold", "7"], None);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "triage.threshold"], None);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "7");
}

#[test]
fn test_suggest_end_of_day_lists_quick_wins() {
    let home = tempfile::tempdir().unwrap();
    let tasks = r#"[
        {"id": "a", "title": "Reply to Sam", "priority": "high", "duration_minutes": 5},
        {"id": "b", "title": "Write chapter", "priority": "urgent", "duration_minutes": 120}
    ]"#;
    let (stdout, _, code) = run_cli(
        home.path(),
        &["suggest", "--context", "end_of_day"],
        Some(tasks),
    );
    assert_eq!(code, 0, "suggest failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["context"], "end_of_day");
    assert_eq!(json["suggestions"][0]["kind"], "quick_win");
    assert_eq!(json["suggestions"][0]["tasks"][0]["id"], "a");
}

#[test]
fn test_suggest_rejects_unknown_context() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["suggest", "--context", "lunchtime"], Some("[]"));
    assert_ne!(code, 0);
}

#[test]
fn test_stats_counts_completions() {
    let home = tempfile::tempdir().unwrap();
    let tasks = r#"[
        {"id": "a", "title": "A", "completed": true, "completed_at": "2025-10-20T10:00:00Z"},
        {"id": "b", "title": "B", "completed": true},
        {"id": "c", "title": "C"}
    ]"#;
    let (stdout, _, code) = run_cli(home.path(), &["stats"], Some(tasks));
    assert_eq!(code, 0, "stats failed");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total_completed"], 1);
    assert_eq!(json["by_weekday"].as_array().map(Vec::len), Some(7));
}

#[test]
fn test_triage_rejects_duplicate_ids() {
    let home = tempfile::tempdir().unwrap();
    let tasks = r#"[{"id": "a", "title": "A"}, {"id": "a", "title": "B"}]"#;
    let (_, stderr, code) = run_cli(home.path(), &["triage"], Some(tasks));
    assert_ne!(code, 0);
    assert!(stderr.contains("duplicate id"));
}
