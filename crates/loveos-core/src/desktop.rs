//! Desktop controller.
//!
//! Owns the progress tracker, the store it persists to, the derived storage
//! key and the final-stage gate. Widgets are built from here, wired to
//! completion handles; everything else reads through `&Desktop`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut desktop = Desktop::open(config, store);
//! let mut heart = desktop.heart_monitor();
//! heart.click();
//! desktop.drain_signals(); // applies completions, saves, updates the gate
//! desktop.tick();          // drives the final-stage countdown
//! ```

use chrono::Utc;

use crate::content::{FINAL_LETTER, QUESTIONS, REASONS};
use crate::dates::days_online;
use crate::error::StorageError;
use crate::events::Event;
use crate::progress::{
    now_ms, progress_key, CompletionHandle, Derived, FinalStageGate, ProgressState,
    ProgressTracker, Task,
};
use crate::storage::{Config, ProgressStore};
use crate::widgets::{HeartMonitor, Quiz, ReasonsPanel, SurpriseLock};

pub struct Desktop<S: ProgressStore> {
    config: Config,
    store: S,
    key: String,
    tracker: ProgressTracker,
    gate: FinalStageGate,
}

impl<S: ProgressStore> Desktop<S> {
    pub fn open(config: Config, store: S) -> Self {
        Self::open_at(config, store, now_ms())
    }

    /// Restore progress for the configured passcode and arm the gate if
    /// level 3 is already open.
    pub fn open_at(config: Config, store: S, now_ms: u64) -> Self {
        let key = progress_key(&config.passcode);
        let state = store.load(&key);
        tracing::debug!(key = %key, ?state, "progress restored");

        let mut gate = FinalStageGate::new(config.final_stage_delay_ms);
        gate.update_at(state.level3_unlocked(), now_ms);

        Self {
            config,
            store,
            key,
            tracker: ProgressTracker::from_state(state),
            gate,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn progress(&self) -> ProgressState {
        self.tracker.state()
    }

    pub fn derived(&self) -> Derived {
        self.tracker.derived()
    }

    pub fn gate(&self) -> &FinalStageGate {
        &self.gate
    }

    /// Whether the level gate for `task` is open.
    pub fn is_available(&self, task: Task) -> bool {
        self.tracker.is_available(task)
    }

    pub fn final_stage_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// The final letter, once the gate has opened.
    pub fn letter(&self) -> Option<&'static str> {
        self.final_stage_ready().then_some(FINAL_LETTER)
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            progress: self.progress(),
            derived: self.derived(),
            days_online: days_online(self.config.start_date),
            final_stage_ready: self.final_stage_ready(),
            at: Utc::now(),
        }
    }

    // ── Widgets ──────────────────────────────────────────────────────

    pub fn completion_handle(&self, task: Task) -> CompletionHandle {
        self.tracker.completion_handle(task)
    }

    pub fn reasons_panel(&self) -> ReasonsPanel {
        ReasonsPanel::new(REASONS.to_vec(), self.completion_handle(Task::Why))
    }

    pub fn heart_monitor(&self) -> HeartMonitor {
        HeartMonitor::new(self.config.heart.clone(), self.completion_handle(Task::Heart))
    }

    pub fn surprise_lock(&self) -> SurpriseLock {
        SurpriseLock::new(&self.config.passcode, self.completion_handle(Task::Code))
    }

    pub fn quiz(&self) -> Quiz {
        Quiz::new(
            QUESTIONS.to_vec(),
            self.config.quiz.clone(),
            self.completion_handle(Task::Questions),
        )
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn mark_task_done(&mut self, task: Task) -> Vec<Event> {
        self.mark_task_done_at(task, now_ms())
    }

    pub fn mark_task_done_at(&mut self, task: Task, now_ms: u64) -> Vec<Event> {
        let events = self.tracker.mark_task_done(task);
        self.after_change(events, now_ms)
    }

    pub fn drain_signals(&mut self) -> Vec<Event> {
        self.drain_signals_at(now_ms())
    }

    /// Apply pending widget completions, persist, and feed the gate.
    pub fn drain_signals_at(&mut self, now_ms: u64) -> Vec<Event> {
        let events = self.tracker.drain_signals();
        self.after_change(events, now_ms)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        self.gate.tick_at(now_ms)
    }

    /// Open the final stage once an external timer reports the delay over.
    pub fn finish_countdown(&mut self) -> Option<Event> {
        self.gate.elapse()
    }

    /// End the session and delete its stored record.
    ///
    /// # Errors
    /// Returns an error if the store cannot remove the record.
    pub fn forget(mut self) -> Result<S, StorageError> {
        self.store.remove(&self.key)?;
        tracing::info!(key = %self.key, "progress record removed");
        Ok(self.store)
    }

    fn after_change(&mut self, mut events: Vec<Event>, now_ms: u64) -> Vec<Event> {
        if events.is_empty() {
            return events;
        }
        self.persist();
        if let Some(event) = self.gate.update_at(self.derived().level3_unlocked, now_ms) {
            events.push(event);
        }
        events
    }

    fn persist(&mut self) {
        let state = self.tracker.state();
        if let Err(e) = self.store.save(&self.key, &state) {
            // In-memory state stays authoritative for the session.
            tracing::warn!(key = %self.key, error = %e, "failed to save progress");
        }
    }
}
