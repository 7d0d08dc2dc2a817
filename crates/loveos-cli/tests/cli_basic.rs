//! Basic CLI E2E tests.
//!
//! Each test runs the binary against its own data directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_loveos"))
        .env("LOVEOS_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_starts_at_zero() {
    let home = TempDir::new().unwrap();
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["derived"]["progress_percent"], 0);
    assert_eq!(status["derived"]["current_level"], 1);
    assert_eq!(status["progress"]["codeDone"], false);
}

#[test]
fn test_key_matches_default_passcode() {
    let home = TempDir::new().unwrap();
    let key = run_json(home.path(), &["key"]);
    assert_eq!(key["key"], "loveos_progress_v1_3229719969");
}

#[test]
fn test_unlock_persists_between_runs() {
    let home = TempDir::new().unwrap();
    let out = run_json(home.path(), &["unlock", "21.12.2025"]);
    assert_eq!(out["widget"]["outcome"], "unlocked");

    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["progress"]["codeDone"], true);
    assert_eq!(status["derived"]["progress_percent"], 20);
}

#[test]
fn test_wrong_code_is_rejected() {
    let home = TempDir::new().unwrap();
    let out = run_json(home.path(), &["unlock", "0000"]);
    assert_eq!(out["widget"]["outcome"], "rejected");
    assert_eq!(out["snapshot"]["progress"]["codeDone"], false);
}

#[test]
fn test_quiz_locked_before_level1() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["quiz", "--answers", "2"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("locked"));
}

#[test]
fn test_full_playthrough() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "set", "final_stage_delay_ms", "0"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");
    run_json(home.path(), &["reasons", "--open", "1,2,3,4,5"]);
    run_json(home.path(), &["heart", "--clicks", "11"]);
    let out = run_json(home.path(), &["unlock", "21122025"]);
    assert_eq!(out["snapshot"]["derived"]["level2_unlocked"], true);
    assert_eq!(out["snapshot"]["derived"]["progress_percent"], 60);

    let out = run_json(home.path(), &["quiz", "--answers", "2,1,1,1,0,1"]);
    assert_eq!(out["widget"]["dodges"], 1);
    assert_eq!(out["widget"]["complete"], true);
    assert_eq!(out["snapshot"]["derived"]["progress_percent"], 100);
    assert_eq!(out["snapshot"]["derived"]["current_level"], 3);

    let (stdout, stderr, code) = run_cli(home.path(), &["letter"]);
    assert_eq!(code, 0, "letter failed: {stderr}");
    assert!(stdout.contains("Your Nedo"));
}

#[test]
fn test_reset_forgets_progress() {
    let home = TempDir::new().unwrap();
    run_json(home.path(), &["unlock", "21122025"]);
    let out = run_json(home.path(), &["reset"]);
    assert_eq!(out["type"], "ProgressReset");
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["derived"]["progress_percent"], 0);
}

#[test]
fn test_config_get() {
    let home = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "heart.max_fill"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "90");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "heart.nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_unreadable_database_runs_unsaved() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("loveos.db"), vec![b'x'; 4096]).unwrap();

    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["derived"]["progress_percent"], 0);

    let out = run_json(home.path(), &["unlock", "21122025"]);
    assert_eq!(out["snapshot"]["progress"]["codeDone"], true);
}

#[test]
fn test_completed_panel_survives_bad_card() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["reasons", "--open", "1,2,3,4,5,9"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("out of bounds"), "{stderr}");

    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["progress"]["whyDone"], true);
}
