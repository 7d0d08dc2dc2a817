//! Async rendition of the final-stage countdown.
//!
//! Used where a caller wants to await the pacing pause instead of ticking a
//! [`FinalStageGate`](super::FinalStageGate). The countdown runs on a tokio
//! task and is aborted on [`cancel`](RevealTimer::cancel) or when the timer
//! is dropped, so a stale "ready" can never be delivered to a torn-down
//! owner.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct RevealTimer {
    ready: watch::Receiver<bool>,
    handle: Option<JoinHandle<()>>,
    cancelled: bool,
}

impl RevealTimer {
    /// Start the countdown. Must be called from within a tokio runtime.
    pub fn start(delay: Duration) -> Self {
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(true);
        });
        Self {
            ready: rx,
            handle: Some(handle),
            cancelled: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        !self.cancelled && *self.ready.borrow()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Abort the countdown and withdraw readiness.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Resolves `true` when ready, `false` if cancelled first.
    pub async fn wait(&mut self) -> bool {
        loop {
            if self.cancelled {
                return false;
            }
            if *self.ready.borrow_and_update() {
                return true;
            }
            if self.ready.changed().await.is_err() {
                // Sender dropped: the task finished or was aborted.
                return self.is_ready();
            }
        }
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn becomes_ready_after_delay() {
        let mut timer = RevealTimer::start(Duration::from_millis(2_500));
        assert!(!timer.is_ready());
        assert!(timer.wait().await);
        assert!(timer.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn not_ready_before_delay() {
        let timer = RevealTimer::start(Duration::from_millis(2_500));
        tokio::time::sleep(Duration::from_millis(2_000)).await;
        assert!(!timer.is_ready());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_timer_never_signals() {
        let mut timer = RevealTimer::start(Duration::from_millis(2_500));
        tokio::time::sleep(Duration::from_millis(1_000)).await;
        timer.cancel();
        tokio::time::sleep(Duration::from_millis(5_000)).await;
        assert!(!timer.is_ready());
        assert!(!timer.wait().await);
        assert!(timer.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_ready_withdraws() {
        let mut timer = RevealTimer::start(Duration::from_millis(10));
        assert!(timer.wait().await);
        timer.cancel();
        assert!(!timer.is_ready());
    }
}
