//! Commands that drive the task widgets.
//!
//! Widget state lives for one invocation, as it would for one page visit;
//! only the task flags are persisted.

use std::time::Duration;

use loveos_core::content::{HEART_MESSAGE, LOCK_REWARD};
use loveos_core::widgets::{LockOutcome, TaskWidget};
use loveos_core::{Desktop, Event, ProgressStore, RevealTimer, Task, ValidationError};
use serde_json::json;

use super::{open_desktop, print_json, CliResult};

fn require_available<S: ProgressStore>(desktop: &Desktop<S>, task: Task) -> CliResult {
    if desktop.is_available(task) {
        return Ok(());
    }
    Err(ValidationError::NotAccepting {
        widget: task.to_string(),
        reason: format!("level {} is locked", task.level()),
    }
    .into())
}

/// Apply completions that fired before a failing input, then fail.
fn abort<S: ProgressStore>(desktop: &mut Desktop<S>, err: ValidationError) -> CliResult {
    desktop.drain_signals();
    Err(err.into())
}

fn finish<S: ProgressStore>(desktop: &mut Desktop<S>, widget: serde_json::Value) -> CliResult {
    let events: Vec<Event> = desktop.drain_signals();
    print_json(&json!({
        "widget": widget,
        "events": events,
        "snapshot": desktop.snapshot(),
    }))
}

pub fn reasons(open: &[usize]) -> CliResult {
    let mut desktop = open_desktop()?;
    let mut panel = desktop.reasons_panel();
    for &number in open {
        let toggled = number
            .checked_sub(1)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "open".into(),
                message: "cards are numbered from 1".into(),
            })
            .and_then(|index| panel.toggle(index));
        if let Err(e) = toggled {
            return abort(&mut desktop, e);
        }
    }
    let widget = json!({
        "cards": panel.cards(),
        "opened": panel.opened_count(),
        "complete": panel.is_complete(),
    });
    finish(&mut desktop, widget)
}

pub fn heart(clicks: u32) -> CliResult {
    let mut desktop = open_desktop()?;
    let mut heart = desktop.heart_monitor();
    let results: Vec<_> = (0..clicks).map(|_| heart.click()).collect();
    let widget = json!({
        "clicks": results,
        "fill": heart.fill(),
        "message": heart.message_visible().then_some(HEART_MESSAGE),
        "complete": heart.is_complete(),
    });
    finish(&mut desktop, widget)
}

pub fn unlock(code: &str) -> CliResult {
    let mut desktop = open_desktop()?;
    let mut lock = desktop.surprise_lock();
    let outcome = lock.submit(code);
    let widget = json!({
        "outcome": outcome,
        "error": lock.error(),
        "reward": (outcome == LockOutcome::Unlocked).then_some(LOCK_REWARD),
    });
    finish(&mut desktop, widget)
}

pub fn quiz(answers: &[usize]) -> CliResult {
    let mut desktop = open_desktop()?;
    require_available(&desktop, Task::Questions)?;
    if desktop.progress().questions_done {
        return finish(&mut desktop, json!({ "complete": true }));
    }

    let mut quiz = desktop.quiz();
    let mut log = Vec::new();
    for &answer in answers {
        let question = quiz.step();
        let outcome = match quiz.answer(answer) {
            Ok(outcome) => outcome,
            Err(e) => return abort(&mut desktop, e),
        };
        let settled = quiz.settle();
        log.push(json!({
            "question": question + 1,
            "answer": answer,
            "outcome": outcome,
            "next": settled,
        }));
        if quiz.is_complete() {
            break;
        }
    }
    let widget = json!({
        "answers": log,
        "current": quiz.current().map(|q| json!({
            "number": quiz.step() + 1,
            "prompt": q.prompt,
            "options": q.options,
        })),
        "dodges": quiz.dodges(),
        "complete": quiz.is_complete(),
    });
    finish(&mut desktop, widget)
}

pub fn letter(wait: bool) -> CliResult {
    let mut desktop = open_desktop()?;
    if !desktop.derived().level3_unlocked {
        return Err(ValidationError::NotAccepting {
            widget: "letter".into(),
            reason: "level 3 is locked".into(),
        }
        .into());
    }

    let remaining_ms = desktop
        .gate()
        .remaining_ms_at(loveos_core::progress::now_ms())
        .unwrap_or(0);
    if !wait {
        return print_json(&json!({
            "ready": desktop.final_stage_ready(),
            "remaining_ms": remaining_ms,
        }));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let ready = runtime.block_on(async {
        let mut timer = RevealTimer::start(Duration::from_millis(remaining_ms));
        timer.wait().await
    });
    if ready {
        desktop.finish_countdown();
    }

    match desktop.letter() {
        Some(text) => {
            println!("{text}");
            Ok(())
        }
        None => Err("the letter is not ready yet".into()),
    }
}
