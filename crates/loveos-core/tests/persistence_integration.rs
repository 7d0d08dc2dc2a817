//! Progress survives a new session on the same store, keyed by passcode.

use loveos_core::storage::{Config, NullStore, ProgressStore, SqliteStore};
use loveos_core::{Desktop, Event, ProgressState, Task};
use tempfile::TempDir;

fn config(passcode: &str) -> Config {
    Config {
        passcode: passcode.to_string(),
        ..Config::default()
    }
}

#[test]
fn resumes_from_sqlite_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loveos.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut desktop = Desktop::open_at(config("21122025"), store, 0);
        let mut lock = desktop.surprise_lock();
        lock.submit("21.12.2025");
        let mut heart = desktop.heart_monitor();
        for _ in 0..11 {
            heart.click();
        }
        desktop.drain_signals_at(0);
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let desktop = Desktop::open_at(config("21122025"), store, 0);
    assert_eq!(
        desktop.progress(),
        ProgressState {
            why_done: false,
            heart_done: true,
            code_done: true,
            questions_done: false,
        }
    );
    assert_eq!(desktop.derived().progress_percent, 40);
}

#[test]
fn new_passcode_starts_fresh_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loveos.db");

    {
        let store = SqliteStore::open_at(&path).unwrap();
        let mut desktop = Desktop::open_at(config("1111"), store, 0);
        desktop.mark_task_done_at(Task::Why, 0);
    }

    let store = SqliteStore::open_at(&path).unwrap();
    let desktop = Desktop::open_at(config("2222"), store, 0);
    assert_eq!(desktop.progress(), ProgressState::default());
    assert_eq!(desktop.store().keys().unwrap().len(), 1);
}

#[test]
fn corrupt_record_starts_fresh() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loveos.db");
    let cfg = config("21122025");
    {
        let mut store = SqliteStore::open_at(&path).unwrap();
        store
            .write(&loveos_core::progress_key(&cfg.passcode), "not json")
            .unwrap();
    }
    let store = SqliteStore::open_at(&path).unwrap();
    let desktop = Desktop::open_at(cfg, store, 0);
    assert_eq!(desktop.progress(), ProgressState::default());
}

#[test]
fn restored_level3_arms_gate_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loveos.db");
    let cfg = config("21122025");
    {
        let mut store = SqliteStore::open_at(&path).unwrap();
        let all = ProgressState {
            why_done: true,
            heart_done: true,
            code_done: true,
            questions_done: true,
        };
        store
            .save(&loveos_core::progress_key(&cfg.passcode), &all)
            .unwrap();
    }
    let store = SqliteStore::open_at(&path).unwrap();
    let mut desktop = Desktop::open_at(cfg, store, 10_000);
    assert!(desktop.letter().is_none());
    assert!(matches!(
        desktop.tick_at(12_500),
        Some(Event::FinalStageReady { .. })
    ));
    assert!(desktop.letter().is_some());
}

#[test]
fn null_store_always_starts_at_zero() {
    let mut desktop = Desktop::open_at(config("21122025"), NullStore, 0);
    desktop.mark_task_done_at(Task::Code, 0);
    assert!(desktop.progress().code_done);

    let desktop = Desktop::open_at(config("21122025"), NullStore, 0);
    assert_eq!(desktop.progress(), ProgressState::default());
}

#[test]
fn full_playthrough() {
    let dir = TempDir::new().unwrap();
    let store = SqliteStore::open_at(dir.path().join("loveos.db")).unwrap();
    let mut desktop = Desktop::open_at(Config::default(), store, 0);

    let mut reasons = desktop.reasons_panel();
    for i in 0..reasons.len() {
        reasons.toggle(i).unwrap();
    }
    let mut heart = desktop.heart_monitor();
    for _ in 0..11 {
        heart.click();
    }
    let mut lock = desktop.surprise_lock();
    lock.submit("21122025");
    desktop.drain_signals_at(0);
    assert_eq!(desktop.derived().current_level, 2);
    assert_eq!(desktop.derived().progress_percent, 60);

    let mut quiz = desktop.quiz();
    let answers: Vec<usize> = loveos_core::content::QUESTIONS
        .iter()
        .map(|q| q.correct_index)
        .collect();
    for answer in answers {
        quiz.answer_at(answer, 0).unwrap();
        quiz.settle();
    }
    let events = desktop.drain_signals_at(100);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::LevelUnlocked { level: 3, .. })));
    assert_eq!(desktop.derived().progress_percent, 100);
    assert!(desktop.tick_at(2_600).is_some());
    assert!(desktop.final_stage_ready());
}
