//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. They run
//! against the dev data directory so a developer's real history is left
//! alone.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wellspring-cli", "--"])
        .args(args)
        .env("WELLSPRING_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_quiz_questions() {
    let (stdout, _, code) = run_cli(&["quiz", "questions"]);
    assert_eq!(code, 0, "Quiz questions failed");
    assert!(stdout.contains("little interest or pleasure"));
    assert!(stdout.contains("Not at all"));
}

#[test]
fn test_quiz_take_noninteractive() {
    let (stdout, _, code) = run_cli(&["quiz", "take", "--answers", "0,1,2,1,0,3,1,0"]);
    assert_eq!(code, 0, "Quiz take failed");
    assert!(stdout.contains("\"score\": 8"));
    assert!(stdout.contains("Mild"));
    assert!(stdout.contains("Use the breathing exercises"));
}

#[test]
fn test_quiz_take_rejects_bad_answers() {
    let (_, _, code) = run_cli(&["quiz", "take", "--answers", "0,1,9"]);
    assert_ne!(code, 0, "Out-of-range answer should fail");
}

// One sequential lifecycle: the breathe subcommands share persisted engine
// state, so running them in separate parallel tests would race.
#[test]
fn test_breathe_lifecycle() {
    // Start from a clean slate; a previous run may have left state behind.
    let (_, _, code) = run_cli(&["breathe", "stop"]);
    assert_eq!(code, 0, "Breathe stop failed");

    let (_, _, code) = run_cli(&["breathe", "run", "--seconds", "2"]);
    assert_eq!(code, 0, "Breathe run failed");

    // The interrupted run leaves its mid-cycle state behind.
    let (stdout, _, code) = run_cli(&["breathe", "status"]);
    assert_eq!(code, 0, "Breathe status failed");
    assert!(stdout.contains("\"phase\": \"inhale\""));
    assert!(stdout.contains("\"running\": true"));

    // Only an explicit stop resets it.
    let (stdout, _, code) = run_cli(&["breathe", "stop"]);
    assert_eq!(code, 0, "Breathe stop failed");
    assert!(stdout.contains("paused"));

    let (stdout, _, code) = run_cli(&["breathe", "status"]);
    assert_eq!(code, 0, "Breathe status failed");
    assert!(stdout.contains("paused"));
}

#[test]
fn test_journal_prompt() {
    let (stdout, _, code) = run_cli(&["journal", "prompt"]);
    assert_eq!(code, 0, "Journal prompt failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    assert!(stdout.contains("breathing"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "notifications.enabled"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(stdout.contains("true") || stdout.contains("false"));
}

#[test]
fn test_config_get_unknown_key() {
    let (_, _, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0, "Unknown config key should fail");
}

#[test]
fn test_auth_status() {
    let (stdout, _, code) = run_cli(&["auth", "status"]);
    assert_eq!(code, 0, "Auth status failed");
    assert!(stdout.contains("signed in") || stdout.contains("not signed in"));
}
