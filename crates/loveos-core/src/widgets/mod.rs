//! Task widgets.
//!
//! Each widget is a small state machine over its own interaction model.
//! The only thing the progress tracker sees is the one-shot signal sent
//! through the widget's [`CompletionHandle`](crate::progress::CompletionHandle).
//! Widget state is session-local and never persisted.

mod heart;
mod lock;
mod quiz;
mod reasons;

pub use heart::{HeartClick, HeartMonitor};
pub use lock::{digits_only, LockOutcome, SurpriseLock, WRONG_CODE_MESSAGE};
pub use quiz::{AnswerOutcome, Feedback, Quiz, QuizPhase, QuizStep};
pub use reasons::{CardView, ReasonsPanel};

use crate::progress::Task;

pub trait TaskWidget {
    /// The flag this widget completes.
    fn task(&self) -> Task;

    /// Whether this widget has delivered its completion signal.
    fn is_complete(&self) -> bool;
}
