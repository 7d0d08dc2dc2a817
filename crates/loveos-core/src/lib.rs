//! # LoveOS Core Library
//!
//! Business logic for the LoveOS greeting: four gated tasks, three levels,
//! and a final letter that opens after a short pause. Every operation is
//! available through the `loveos` CLI; a graphical shell would be a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Progress**: four monotonic task flags and the level/percent values
//!   derived from them, plus the final-stage gate
//! - **Widgets**: heart monitor, surprise lock, reasons panel and quiz as
//!   wall-clock state machines that emit one-shot completion signals
//! - **Storage**: keyed progress records (SQLite, in-memory, or none) and
//!   TOML configuration
//!
//! ## Key Components
//!
//! - [`Desktop`]: controller that owns the tracker, store and gate
//! - [`ProgressTracker`]: single source of truth for the task flags
//! - [`ProgressStore`]: persistence seam for progress records
//! - [`Config`]: application configuration management

pub mod content;
pub mod dates;
pub mod desktop;
pub mod error;
pub mod events;
pub mod progress;
pub mod storage;
pub mod widgets;

pub use desktop::Desktop;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use progress::{
    progress_key, CompletionHandle, Derived, FinalStageGate, ProgressState, ProgressTracker,
    RevealTimer, Task,
};
pub use storage::{Config, MemoryStore, NullStore, ProgressStore, SqliteStore};
pub use widgets::{HeartMonitor, Quiz, ReasonsPanel, SurpriseLock, TaskWidget};
