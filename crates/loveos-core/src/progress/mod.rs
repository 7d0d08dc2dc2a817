mod gate;
mod key;
mod reveal;
mod state;
mod tracker;

pub use gate::{now_ms, FinalStageGate, GateState, DEFAULT_FINAL_STAGE_DELAY_MS};
pub use key::{passcode_hash, progress_key, KEY_PREFIX};
pub use reveal::RevealTimer;
pub use state::{Derived, ProgressState, Task};
pub use tracker::{CompletionHandle, ProgressTracker};
