use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{Derived, ProgressState, Task};

/// Every progress change produces an Event.
/// The CLI prints them; a GUI shell would render from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A task flag flipped from false to true.
    TaskCompleted {
        task: Task,
        progress_percent: u8,
        at: DateTime<Utc>,
    },
    /// A level gate opened as a consequence of a task completing.
    LevelUnlocked { level: u8, at: DateTime<Utc> },
    /// Level 3 unlocked; the reveal countdown started.
    FinalStageArmed { delay_ms: u64, at: DateTime<Utc> },
    /// The countdown elapsed and the final content may be shown.
    FinalStageReady { at: DateTime<Utc> },
    /// The countdown was withdrawn before it elapsed.
    FinalStageCancelled { at: DateTime<Utc> },
    StateSnapshot {
        progress: ProgressState,
        derived: Derived,
        days_online: i64,
        final_stage_ready: bool,
        at: DateTime<Utc>,
    },
}
