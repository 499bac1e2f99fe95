//! Integration tests for the fitlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Workout recording, lookup, listing and deletion
//! - Statistics and weekly progress
//! - Reminders and the weekly goal
//! - Persistence across invocations and CSV export

use assert_cmd::Command;
use chrono::{Duration, Local};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// CLI bound to `dir`, isolated from any user configuration
fn cli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fitlog"));
    cmd.env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(dir.join("data"));
    cmd
}

/// Run a command that must succeed and return its `data` payload
fn ok(dir: &Path, args: &[&str]) -> Value {
    let output = cli(dir).args(args).assert().success().get_output().stdout.clone();
    let envelope: Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(envelope["success"], true);
    envelope["data"].clone()
}

/// Run a command that must fail softly and return its error message
fn fails(dir: &Path, args: &[&str]) -> String {
    let output = cli(dir).args(args).assert().code(1).get_output().stdout.clone();
    let envelope: Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(envelope["success"], false);
    envelope["error"].as_str().unwrap_or_default().to_string()
}

fn days_ago(days: i64) -> String {
    (Local::now().naive_local() - Duration::days(days))
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}

#[test]
fn test_cli_help() {
    let temp_dir = setup_test_dir();
    cli(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Personal workout tracker"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let temp_dir = setup_test_dir();
    let output = cli(temp_dir.path())
        .args(["--verbose", "stats"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Using data directory"))
        .get_output()
        .stdout
        .clone();

    let envelope: Value = serde_json::from_slice(&output).expect("stdout is JSON");
    assert_eq!(envelope["success"], true);

    cli(temp_dir.path())
        .arg("stats")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_add_run_workout() {
    let temp_dir = setup_test_dir();
    let workout = ok(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "30", "--exercise", "Running"],
    );

    assert_eq!(workout["id"], 1);
    assert_eq!(workout["type"], "Run");
    assert_eq!(workout["total_calories"], 195);
    assert_eq!(workout["notes"], "");
    assert_eq!(workout["exercises"][0]["name"], "Running");

    assert!(temp_dir.path().join("data/workouts.json").exists());
}

#[test]
fn test_add_from_json_body_keeps_exercise_fields() {
    let temp_dir = setup_test_dir();
    let body = r#"{"type":"Strength","duration_minutes":40,
        "exercises":[{"name":"Weight lifting","sets":5}],
        "notes":"heavy","date":"2024-01-15 07:30:00"}"#;

    let workout = ok(temp_dir.path(), &["workouts", "add", "--json", body]);
    assert_eq!(workout["total_calories"], 240);
    assert_eq!(workout["date"], "2024-01-15T07:30:00");
    assert_eq!(workout["exercises"][0]["sets"], 5);
}

#[test]
fn test_add_then_get_returns_same_record() {
    let temp_dir = setup_test_dir();
    let added = ok(
        temp_dir.path(),
        &["workouts", "add", "--type", "Swim", "--duration", "25", "--exercise", "Swim"],
    );

    let fetched = ok(temp_dir.path(), &["workouts", "get", "1"]);
    assert_eq!(fetched, added);
}

#[test]
fn test_missing_field_reports_its_name() {
    let temp_dir = setup_test_dir();
    let error = fails(
        temp_dir.path(),
        &["workouts", "add", "--json", r#"{"duration_minutes":10,"exercises":[]}"#],
    );
    assert!(error.contains("type"), "unexpected error: {error}");

    let error = fails(temp_dir.path(), &["workouts", "add", "--type", "Run"]);
    assert!(error.contains("duration_minutes"), "unexpected error: {error}");
}

#[test]
fn test_negative_duration_rejected() {
    let temp_dir = setup_test_dir();
    let error = fails(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "-10"],
    );
    assert!(error.contains("duration_minutes"));
}

#[test]
fn test_huge_duration_rejected() {
    let temp_dir = setup_test_dir();
    let error = fails(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "922337203685477580"],
    );
    assert!(error.contains("duration_minutes"), "unexpected error: {error}");
    assert!(!temp_dir.path().join("data/workouts.json").exists());
}

#[test]
fn test_list_newest_first_with_limit() {
    let temp_dir = setup_test_dir();
    for (kind, date) in [("A", "2024-01-10"), ("B", "2024-01-12"), ("C", "2024-01-11")] {
        ok(
            temp_dir.path(),
            &["workouts", "add", "--type", kind, "--duration", "10", "--date", date],
        );
    }

    let all = ok(temp_dir.path(), &["workouts", "list"]);
    let types: Vec<_> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(types, vec!["B", "C", "A"]);

    let limited = ok(temp_dir.path(), &["workouts", "list", "--limit", "1"]);
    assert_eq!(limited.as_array().unwrap().len(), 1);
    assert_eq!(limited[0]["type"], "B");
}

#[test]
fn test_delete_workout() {
    let temp_dir = setup_test_dir();
    for _ in 0..3 {
        ok(temp_dir.path(), &["workouts", "add", "--type", "Run", "--duration", "10"]);
    }

    let deleted = ok(temp_dir.path(), &["workouts", "delete", "2"]);
    assert_eq!(deleted["deleted"], true);

    let listed = ok(temp_dir.path(), &["workouts", "list"]);
    assert!(listed.as_array().unwrap().iter().all(|w| w["id"] != 2));

    let error = fails(temp_dir.path(), &["workouts", "get", "2"]);
    assert_eq!(error, "workout 2 not found");
}

#[test]
fn test_delete_unknown_id_changes_nothing() {
    let temp_dir = setup_test_dir();
    ok(temp_dir.path(), &["workouts", "add", "--type", "Run", "--duration", "10"]);
    let before = fs::read_to_string(temp_dir.path().join("data/workouts.json")).unwrap();

    let error = fails(temp_dir.path(), &["workouts", "delete", "9"]);
    assert!(error.contains("not found"));

    let after = fs::read_to_string(temp_dir.path().join("data/workouts.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_ids_not_reused_across_runs() {
    let temp_dir = setup_test_dir();
    for _ in 0..3 {
        ok(temp_dir.path(), &["workouts", "add", "--type", "Run", "--duration", "10"]);
    }
    ok(temp_dir.path(), &["workouts", "delete", "2"]);

    let next = ok(temp_dir.path(), &["workouts", "add", "--type", "Run", "--duration", "10"]);
    assert_eq!(next["id"], 4);
}

#[test]
fn test_count_strategy_from_config_file() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("fitlog.toml");
    fs::write(&config_path, "[ids]\nstrategy = \"count\"\n").unwrap();

    let add = |dir: &Path| {
        let output = cli(dir)
            .arg("--config")
            .arg(&config_path)
            .args(["workouts", "add", "--type", "Run", "--duration", "10"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice::<Value>(&output).unwrap()["data"]["id"].clone()
    };

    add(temp_dir.path());
    add(temp_dir.path());
    ok(temp_dir.path(), &["workouts", "delete", "1"]);
    assert_eq!(add(temp_dir.path()), 2);
}

#[test]
fn test_stats_on_empty_store() {
    let temp_dir = setup_test_dir();
    let stats = ok(temp_dir.path(), &["stats"]);

    assert_eq!(stats["total_workouts"], 0);
    assert_eq!(stats["total_duration"], 0);
    assert_eq!(stats["total_calories"], 0);
    assert_eq!(stats["average_duration"], 0);
    assert_eq!(stats["recent_workouts_30d"], 0);
    assert_eq!(stats["workout_types"], serde_json::json!({}));
}

#[test]
fn test_week_progress_and_recent_stats() {
    let temp_dir = setup_test_dir();
    ok(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "30", "--exercise", "Running"],
    );
    ok(temp_dir.path(), &["workouts", "add", "--type", "Yoga", "--duration", "20"]);
    let old = days_ago(40);
    ok(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "60", "--date", &old],
    );

    let progress = ok(temp_dir.path(), &["progress"]);
    assert_eq!(progress["sessions_completed"], 2);
    assert_eq!(progress["calories_burned"], 195 + 100);
    assert_eq!(progress["session_goal"], 0);
    assert!(progress["week_start"].as_str().unwrap().ends_with("T00:00:00"));

    let stats = ok(temp_dir.path(), &["stats"]);
    assert_eq!(stats["total_workouts"], 3);
    assert_eq!(stats["recent_workouts_30d"], 2);
    assert_eq!(stats["workout_types"]["Run"], 2);
    assert_eq!(stats["average_duration"], 36);
}

#[test]
fn test_goal_set_and_show() {
    let temp_dir = setup_test_dir();

    let unset = ok(temp_dir.path(), &["goal", "show"]);
    assert_eq!(unset, serde_json::json!({"session_goal": 0, "calorie_goal": 0}));

    ok(temp_dir.path(), &["goal", "set", "--sessions", "3", "--calories", "1000"]);
    let goal = ok(temp_dir.path(), &["goal", "show"]);
    assert_eq!(goal, serde_json::json!({"session_goal": 3, "calorie_goal": 1000}));

    let progress = ok(temp_dir.path(), &["progress"]);
    assert_eq!(progress["session_goal"], 3);
    assert_eq!(progress["calorie_goal"], 1000);
}

#[test]
fn test_goal_requires_both_fields() {
    let temp_dir = setup_test_dir();
    let error = fails(temp_dir.path(), &["goal", "set", "--json", r#"{"session_goal":3}"#]);
    assert!(error.contains("calorie_goal"));

    let error = fails(temp_dir.path(), &["goal", "set", "--calories", "500"]);
    assert!(error.contains("session_goal"));
}

#[test]
fn test_reminders_upcoming_only() {
    let temp_dir = setup_test_dir();
    ok(temp_dir.path(), &["reminders", "add", "--date", "2999-06-01T07:00:00", "--message", "later"]);
    ok(temp_dir.path(), &["reminders", "add", "--date", "2000-01-01T07:00:00", "--message", "past"]);
    let reminder = ok(temp_dir.path(), &["reminders", "add", "--date", "2999-01-01"]);
    assert_eq!(reminder["message"], "Workout Reminder");
    assert_eq!(reminder["id"], 3);

    let upcoming = ok(temp_dir.path(), &["reminders", "list"]);
    let dates: Vec<_> = upcoming
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, vec!["2999-01-01T00:00:00", "2999-06-01T07:00:00"]);
}

#[test]
fn test_reminder_requires_date() {
    let temp_dir = setup_test_dir();
    let error = fails(temp_dir.path(), &["reminders", "add", "--message", "stretch"]);
    assert!(error.contains("date"));
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    ok(
        temp_dir.path(),
        &["workouts", "add", "--type", "Run", "--duration", "30", "--exercise", "Running"],
    );

    let out = temp_dir.path().join("export/workouts.csv");
    let result = ok(temp_dir.path(), &["export", "--output", out.to_str().unwrap()]);
    assert_eq!(result["exported"], 1);

    let csv_content = fs::read_to_string(&out).expect("Failed to read CSV");
    assert!(csv_content.starts_with("id,date,type,duration_minutes"));
    assert!(csv_content.contains("Running"));
}
