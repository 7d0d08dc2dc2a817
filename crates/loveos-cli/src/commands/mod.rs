pub mod config;
pub mod play;
pub mod progress;

use loveos_core::error::Result;
use loveos_core::storage::{self, ProgressStore};
use loveos_core::{Config, Desktop};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the configuration and restore the session it points at.
pub fn open_desktop() -> Result<Desktop<Box<dyn ProgressStore>>> {
    let config = Config::load()?;
    let store = storage::open_configured(&config);
    let desktop = Desktop::open(config, store);
    tracing::debug!(key = desktop.key(), "session opened");
    Ok(desktop)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
