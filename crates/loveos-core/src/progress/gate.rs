//! Final-stage gate.
//!
//! Pacing pause between "level 3 unlocked" and "level 3 content shown".
//! Like the quiz and the heart monitor this is a wall-clock state machine
//! without threads: the owner feeds it the unlock condition with
//! [`update`](FinalStageGate::update) and calls [`tick`](FinalStageGate::tick)
//! periodically.
//!
//! ```text
//! Locked -> Counting -> Ready
//!    ^         |          |
//!    +---------+----------+   (condition withdrawn)
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

pub const DEFAULT_FINAL_STAGE_DELAY_MS: u64 = 2_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state")]
pub enum GateState {
    Locked,
    Counting { armed_at_ms: u64 },
    Ready,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalStageGate {
    delay_ms: u64,
    state: GateState,
}

impl Default for FinalStageGate {
    fn default() -> Self {
        Self::new(DEFAULT_FINAL_STAGE_DELAY_MS)
    }
}

impl FinalStageGate {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            state: GateState::Locked,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    /// Time left before ready, `None` unless counting.
    pub fn remaining_ms_at(&self, now_ms: u64) -> Option<u64> {
        match self.state {
            GateState::Counting { armed_at_ms } => {
                Some(self.delay_ms.saturating_sub(now_ms.saturating_sub(armed_at_ms)))
            }
            _ => None,
        }
    }

    pub fn update(&mut self, unlocked: bool) -> Option<Event> {
        self.update_at(unlocked, now_ms())
    }

    /// Feed the current unlock condition.
    ///
    /// A false -> true edge arms the countdown. Losing the condition cancels
    /// a pending countdown and withdraws readiness.
    pub fn update_at(&mut self, unlocked: bool, now_ms: u64) -> Option<Event> {
        match (self.state, unlocked) {
            (GateState::Locked, true) => {
                self.state = GateState::Counting { armed_at_ms: now_ms };
                tracing::debug!(delay_ms = self.delay_ms, "final stage armed");
                Some(Event::FinalStageArmed {
                    delay_ms: self.delay_ms,
                    at: Utc::now(),
                })
            }
            (GateState::Counting { .. } | GateState::Ready, false) => self.cancel(),
            _ => None,
        }
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Returns `Some(Event::FinalStageReady)` once, when the delay elapses.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<Event> {
        match self.state {
            GateState::Counting { armed_at_ms }
                if now_ms.saturating_sub(armed_at_ms) >= self.delay_ms =>
            {
                self.state = GateState::Ready;
                tracing::info!("final stage ready");
                Some(Event::FinalStageReady { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Complete a pending countdown on an external timer's say-so.
    ///
    /// For owners that wait on a monotonic timer, whose elapsed signal
    /// should not be second-guessed by the wall clock.
    pub fn elapse(&mut self) -> Option<Event> {
        match self.state {
            GateState::Counting { .. } => {
                self.state = GateState::Ready;
                tracing::info!("final stage ready");
                Some(Event::FinalStageReady { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Drop a pending countdown or withdraw readiness.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.state == GateState::Locked {
            return None;
        }
        self.state = GateState::Locked;
        tracing::debug!("final stage cancelled");
        Some(Event::FinalStageCancelled { at: Utc::now() })
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
