//! Surprise lock: passcode entry.

use serde::Serialize;

use super::TaskWidget;
use crate::progress::{CompletionHandle, Task};

pub const WRONG_CODE_MESSAGE: &str = "Nope 😄 try again";

/// Keep ASCII digits only, so `21.12.2025` and `21/12/2025` both match
/// `21122025`.
pub fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockOutcome {
    Unlocked,
    Rejected,
}

#[derive(Debug)]
pub struct SurpriseLock {
    expected: String,
    unlocked: bool,
    error: Option<&'static str>,
    handle: CompletionHandle,
}

impl SurpriseLock {
    pub fn new(passcode: &str, handle: CompletionHandle) -> Self {
        Self {
            expected: digits_only(passcode.trim()),
            unlocked: false,
            error: None,
            handle,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// An empty or digit-free entry never matches.
    pub fn submit(&mut self, code: &str) -> LockOutcome {
        self.error = None;
        let typed = digits_only(code.trim());
        if !typed.is_empty() && typed == self.expected {
            self.unlocked = true;
            self.handle.fire();
            return LockOutcome::Unlocked;
        }
        self.error = Some(WRONG_CODE_MESSAGE);
        LockOutcome::Rejected
    }

    /// Relock the local view. The completion already delivered stays.
    pub fn reset_view(&mut self) {
        self.unlocked = false;
        self.error = None;
    }
}

impl TaskWidget for SurpriseLock {
    fn task(&self) -> Task {
        Task::Code
    }

    fn is_complete(&self) -> bool {
        self.handle.is_fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressTracker;

    #[test]
    fn digits_only_strips_separators() {
        assert_eq!(digits_only("21.12.2025"), "21122025");
        assert_eq!(digits_only(" 21 / 12 / 2025 "), "21122025");
        assert_eq!(digits_only("abc"), "");
    }

    #[test]
    fn accepts_formatted_date() {
        let mut tracker = ProgressTracker::new();
        let mut lock = SurpriseLock::new("21122025", tracker.completion_handle(Task::Code));
        assert_eq!(lock.submit("21.12.2025"), LockOutcome::Unlocked);
        assert!(lock.is_unlocked());
        assert!(lock.error().is_none());
        tracker.drain_signals();
        assert!(tracker.is_done(Task::Code));
    }

    #[test]
    fn rejects_wrong_and_empty_codes() {
        let tracker = ProgressTracker::new();
        let mut lock = SurpriseLock::new("21122025", tracker.completion_handle(Task::Code));
        assert_eq!(lock.submit("22.12.2025"), LockOutcome::Rejected);
        assert_eq!(lock.error(), Some(WRONG_CODE_MESSAGE));
        assert_eq!(lock.submit("   "), LockOutcome::Rejected);
        assert!(!lock.is_complete());
    }

    #[test]
    fn passcode_without_digits_cannot_unlock() {
        let tracker = ProgressTracker::new();
        let mut lock = SurpriseLock::new("secret", tracker.completion_handle(Task::Code));
        assert_eq!(lock.submit("secret"), LockOutcome::Rejected);
    }

    #[test]
    fn reset_view_keeps_tracker_flag() {
        let mut tracker = ProgressTracker::new();
        let mut lock = SurpriseLock::new("1234", tracker.completion_handle(Task::Code));
        lock.submit("1234");
        tracker.drain_signals();
        lock.reset_view();
        assert!(!lock.is_unlocked());
        assert!(lock.is_complete());
        assert!(tracker.is_done(Task::Code));

        // Unlocking again is harmless.
        assert_eq!(lock.submit("1234"), LockOutcome::Unlocked);
        assert!(tracker.drain_signals().is_empty());
    }
}
