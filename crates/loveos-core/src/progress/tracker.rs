//! Progress tracker.
//!
//! Single owner of the task flags. Widgets never touch the flags: they hold
//! a [`CompletionHandle`] and fire it once; the tracker applies the signal
//! when its owner calls [`ProgressTracker::drain_signals`].

use chrono::Utc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::state::{Derived, ProgressState, Task};
use crate::events::Event;

/// Single-fire completion channel handed to a widget.
///
/// The first [`fire`](CompletionHandle::fire) sends the task to the tracker;
/// later calls are no-ops.
#[derive(Debug)]
pub struct CompletionHandle {
    task: Task,
    tx: UnboundedSender<Task>,
    fired: bool,
}

impl CompletionHandle {
    pub fn task(&self) -> Task {
        self.task
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` if this call delivered the signal.
    pub fn fire(&mut self) -> bool {
        if self.fired {
            return false;
        }
        self.fired = true;
        // The tracker keeps its own sender alive, so this only fails once
        // the tracker is gone and nobody is left to observe the signal.
        self.tx.send(self.task).is_ok()
    }
}

#[derive(Debug)]
pub struct ProgressTracker {
    state: ProgressState,
    tx: UnboundedSender<Task>,
    rx: UnboundedReceiver<Task>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Fresh session: all flags false.
    pub fn new() -> Self {
        Self::from_state(ProgressState::default())
    }

    /// Resume from a restored record.
    pub fn from_state(state: ProgressState) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn is_done(&self, task: Task) -> bool {
        self.state.is_done(task)
    }

    pub fn derived(&self) -> Derived {
        self.state.derived()
    }

    /// Whether the level gate for `task` is open.
    pub fn is_available(&self, task: Task) -> bool {
        self.derived().level_open(task.level())
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Issue a completion handle for a widget.
    pub fn completion_handle(&self, task: Task) -> CompletionHandle {
        CompletionHandle {
            task,
            tx: self.tx.clone(),
            fired: false,
        }
    }

    /// Set the flag for `task`.
    ///
    /// Idempotent: signalling a task that is already done returns no
    /// events and changes nothing.
    pub fn mark_task_done(&mut self, task: Task) -> Vec<Event> {
        let before = self.derived();
        if !self.state.set_done(task) {
            return Vec::new();
        }
        let after = self.derived();
        tracing::debug!(%task, percent = after.progress_percent, "task completed");

        let at = Utc::now();
        let mut events = vec![Event::TaskCompleted {
            task,
            progress_percent: after.progress_percent,
            at,
        }];
        if after.level2_unlocked && !before.level2_unlocked {
            tracing::info!("level 2 unlocked");
            events.push(Event::LevelUnlocked { level: 2, at });
        }
        if after.level3_unlocked && !before.level3_unlocked {
            tracing::info!("level 3 unlocked");
            events.push(Event::LevelUnlocked { level: 3, at });
        }
        events
    }

    /// Apply every completion signal received since the last call.
    pub fn drain_signals(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(task) = self.rx.try_recv() {
            events.extend(self.mark_task_done(task));
        }
        events
    }
}
