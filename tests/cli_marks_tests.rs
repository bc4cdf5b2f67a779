//! End-to-end tests for `timelyo marks` command.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the timelyo binary
fn timelyo_bin() -> &'static str {
    env!("CARGO_BIN_EXE_timelyo")
}

fn marks(state_file: &Path, args: &[&str]) -> std::process::Output {
    Command::new(timelyo_bin())
        .arg("--state-file")
        .arg(state_file)
        .arg("marks")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_marks_toggle_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    let output = marks(&state_file, &["toggle", "2024-03-15"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Marked 2024-03-15"
    );

    marks(&state_file, &["toggle", "2024-01-01"]);

    let output = marks(&state_file, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let entries: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    // Ascending order
    assert_eq!(entries[0]["date"], "2024-01-01");
    assert_eq!(entries[1]["date"], "2024-03-15");
    assert_eq!(entries[1]["hijri"]["year"], 1445);
    assert_eq!(entries[1]["hijri"]["month"], 2);
    assert_eq!(entries[1]["hijri"]["day"], 14);
}

#[test]
fn test_marks_toggle_twice_unmarks() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    marks(&state_file, &["toggle", "2024-03-15"]);
    let output = marks(&state_file, &["toggle", "2024-03-15"]);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Unmarked 2024-03-15"
    );

    let output = marks(&state_file, &["list"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_marks_state_file_format() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("nested").join("state.json");

    marks(&state_file, &["toggle", "2024-03-15"]);

    let content = fs::read_to_string(&state_file).expect("state file written");
    let state: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(state["timelyo-marked-dates"], r#"["2024-03-15"]"#);
}

#[test]
fn test_marks_clear() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    marks(&state_file, &["toggle", "2024-03-15"]);
    marks(&state_file, &["toggle", "2024-03-16"]);

    let output = marks(&state_file, &["clear"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Cleared 2 marked dates"
    );

    let output = marks(&state_file, &["list", "--json"]);
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries, serde_json::json!([]));
}

#[test]
fn test_marks_keep_other_preferences() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");
    fs::write(
        &state_file,
        r#"{"timelyo-language": "ar", "timelyo-calendar-type": "hijri"}"#,
    )
    .unwrap();

    marks(&state_file, &["toggle", "2024-03-15"]);

    let state: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&state_file).unwrap()).unwrap();
    assert_eq!(state["timelyo-language"], "ar");
    assert_eq!(state["timelyo-calendar-type"], "hijri");
}

#[test]
fn test_marks_malformed_list_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");
    fs::write(&state_file, r#"{"timelyo-marked-dates": "not json"}"#).unwrap();

    let output = marks(&state_file, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(0));
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries, serde_json::json!([]));
}

#[test]
fn test_marks_invalid_date() {
    let temp_dir = TempDir::new().unwrap();
    let state_file = temp_dir.path().join("state.json");

    let output = marks(&state_file, &["toggle", "15/03/2024"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!state_file.exists());
}

#[test]
fn test_marks_unreadable_state_file() {
    let temp_dir = TempDir::new().unwrap();

    // A directory cannot be read as a state file
    let output = marks(temp_dir.path(), &["list"]);
    assert_eq!(output.status.code(), Some(2), "I/O failures should exit 2");
}
