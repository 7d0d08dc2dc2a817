//! Sequential quiz.
//!
//! Questions are answered in order. A correct answer holds its feedback for
//! a short delay before moving on; on the last question the delay is longer
//! and completes the quiz. A wrong answer shows feedback briefly and leaves
//! the question open. A question may carry an evasive option that is never
//! accepted as an answer: picking it just makes it dodge.
//!
//! ## Phases
//!
//! ```text
//! Asking -> Advancing -> Asking (next question)
//!   |            \-----> Completed (last question)
//!   +--> ShowingWrong -> Asking
//! ```
//!
//! Like the timer engine, time only moves when the caller ticks.

use serde::Serialize;

use super::TaskWidget;
use crate::content::Question;
use crate::error::ValidationError;
use crate::progress::{now_ms, CompletionHandle, Task};
use crate::storage::QuizConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Correct,
    Wrong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    Asking,
    Advancing { until_ms: u64 },
    ShowingWrong { until_ms: u64 },
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    /// The evasive option moved away; nothing was answered.
    Dodged { dodges: u32 },
    /// A correct answer is already pending; input is ignored until it settles.
    Ignored,
}

/// What a tick moved the quiz to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum QuizStep {
    NextQuestion { index: usize },
    FeedbackCleared,
    Completed,
}

#[derive(Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    config: QuizConfig,
    step: usize,
    phase: QuizPhase,
    feedback: Option<Feedback>,
    dodges: u32,
    handle: CompletionHandle,
}

impl Quiz {
    pub fn new(questions: Vec<Question>, config: QuizConfig, handle: CompletionHandle) -> Self {
        Self {
            questions,
            config,
            step: 0,
            phase: QuizPhase::Asking,
            feedback: None,
            dodges: 0,
            handle,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn current(&self) -> Option<&Question> {
        match self.phase {
            QuizPhase::Completed => None,
            _ => self.questions.get(self.step),
        }
    }

    fn is_final(&self) -> bool {
        self.step + 1 == self.questions.len()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn answer(&mut self, index: usize) -> Result<AnswerOutcome, ValidationError> {
        self.answer_at(index, now_ms())
    }

    /// Answer the current question with option `index`.
    ///
    /// # Errors
    /// Fails when the quiz is already completed or `index` is not an option.
    pub fn answer_at(&mut self, index: usize, now_ms: u64) -> Result<AnswerOutcome, ValidationError> {
        let question = match (self.phase, self.questions.get(self.step)) {
            (QuizPhase::Completed, _) | (_, None) => {
                return Err(ValidationError::NotAccepting {
                    widget: "quiz".into(),
                    reason: "already completed".into(),
                })
            }
            (QuizPhase::Advancing { .. }, _) => return Ok(AnswerOutcome::Ignored),
            (_, Some(q)) => q,
        };

        if index >= question.options.len() {
            return Err(ValidationError::OutOfBounds {
                collection: format!("question {} options", self.step + 1),
                index,
                len: question.options.len(),
            });
        }

        if question.evasive_index == Some(index) {
            self.dodges = self.dodges.saturating_add(1);
            return Ok(AnswerOutcome::Dodged {
                dodges: self.dodges,
            });
        }

        if index == question.correct_index {
            let delay = if self.is_final() {
                self.config.final_advance_delay_ms
            } else {
                self.config.advance_delay_ms
            };
            self.feedback = Some(Feedback::Correct);
            self.phase = QuizPhase::Advancing {
                until_ms: now_ms.saturating_add(delay),
            };
            Ok(AnswerOutcome::Correct)
        } else {
            self.feedback = Some(Feedback::Wrong);
            self.phase = QuizPhase::ShowingWrong {
                until_ms: now_ms.saturating_add(self.config.wrong_feedback_ms),
            };
            Ok(AnswerOutcome::Wrong)
        }
    }

    pub fn tick(&mut self) -> Option<QuizStep> {
        self.tick_at(now_ms())
    }

    /// Settle a pending delay once it has elapsed.
    pub fn tick_at(&mut self, now_ms: u64) -> Option<QuizStep> {
        match self.phase {
            QuizPhase::Advancing { until_ms } if now_ms >= until_ms => {
                if self.is_final() {
                    self.phase = QuizPhase::Completed;
                    self.handle.fire();
                    tracing::debug!(dodges = self.dodges, "quiz completed");
                    Some(QuizStep::Completed)
                } else {
                    self.step += 1;
                    self.feedback = None;
                    self.phase = QuizPhase::Asking;
                    Some(QuizStep::NextQuestion { index: self.step })
                }
            }
            QuizPhase::ShowingWrong { until_ms } if now_ms >= until_ms => {
                self.feedback = None;
                self.phase = QuizPhase::Asking;
                Some(QuizStep::FeedbackCleared)
            }
            _ => None,
        }
    }

    /// Resolve any pending delay immediately.
    pub fn settle(&mut self) -> Option<QuizStep> {
        self.tick_at(u64::MAX)
    }
}

impl TaskWidget for Quiz {
    fn task(&self) -> Task {
        Task::Questions
    }

    fn is_complete(&self) -> bool {
        self.handle.is_fired()
    }
}
