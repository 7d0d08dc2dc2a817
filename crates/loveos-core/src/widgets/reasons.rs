//! Reasons panel: a row of cards that open and close.
//!
//! Completion fires the first time every card has been opened at least
//! once. Closing cards afterwards does not undo it.

use serde::Serialize;

use super::TaskWidget;
use crate::content::Reason;
use crate::error::ValidationError;
use crate::progress::{CompletionHandle, Task};

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub index: usize,
    pub open: bool,
    pub heading: String,
    pub body: Option<&'static str>,
}

#[derive(Debug)]
pub struct ReasonsPanel {
    reasons: Vec<Reason>,
    open: Vec<bool>,
    opened_ever: Vec<bool>,
    handle: CompletionHandle,
}

impl ReasonsPanel {
    pub fn new(reasons: Vec<Reason>, handle: CompletionHandle) -> Self {
        let len = reasons.len();
        Self {
            reasons,
            open: vec![false; len],
            opened_ever: vec![false; len],
            handle,
        }
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open.get(index).copied().unwrap_or(false)
    }

    pub fn opened_count(&self) -> usize {
        self.opened_ever.iter().filter(|o| **o).count()
    }

    /// Open a closed card or close an open one. Returns the new open state.
    pub fn toggle(&mut self, index: usize) -> Result<bool, ValidationError> {
        let len = self.reasons.len();
        let slot = self
            .open
            .get_mut(index)
            .ok_or_else(|| ValidationError::OutOfBounds {
                collection: "reasons".into(),
                index,
                len,
            })?;
        *slot = !*slot;
        let now_open = *slot;

        if now_open {
            self.opened_ever[index] = true;
            if !self.handle.is_fired() && self.opened_ever.iter().all(|o| *o) {
                tracing::debug!("every reason opened");
                self.handle.fire();
            }
        }
        Ok(now_open)
    }

    pub fn cards(&self) -> Vec<CardView> {
        self.reasons
            .iter()
            .enumerate()
            .map(|(index, reason)| {
                let open = self.open[index];
                CardView {
                    index,
                    open,
                    heading: if open {
                        format!("Reason #{}", index + 1)
                    } else {
                        reason.title.to_string()
                    },
                    body: open.then_some(reason.body),
                }
            })
            .collect()
    }
}

impl TaskWidget for ReasonsPanel {
    fn task(&self) -> Task {
        Task::Why
    }

    fn is_complete(&self) -> bool {
        self.handle.is_fired()
    }
}
