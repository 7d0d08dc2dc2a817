mod config;
pub mod memory;
pub mod sqlite;

pub use config::{Config, HeartConfig, QuizConfig};
pub use memory::{MemoryStore, NullStore};
pub use sqlite::SqliteStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StorageError};
use crate::progress::ProgressState;

/// Returns the data directory, creating it if needed.
///
/// `LOVEOS_HOME` overrides the location outright. Otherwise the directory is
/// `~/.config/loveos[-dev]/`, with `LOVEOS_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LOVEOS_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LOVEOS_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("loveos-dev")
            } else {
                base_dir.join("loveos")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// Keyed text store holding progress records.
///
/// Implementations only move strings; decoding and the "never fail on
/// read" policy live in the provided [`load`](ProgressStore::load) and
/// [`save`](ProgressStore::save).
pub trait ProgressStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: &str) -> Result<(), StorageError>;

    /// Restore the record under `key`.
    ///
    /// Missing, unreadable or corrupt records yield the all-false state.
    fn load(&self, key: &str) -> ProgressState {
        match self.read(key) {
            Ok(Some(raw)) => ProgressState::from_record(&raw),
            Ok(None) => ProgressState::default(),
            Err(e) => {
                tracing::debug!(key, error = %e, "progress read failed, starting fresh");
                ProgressState::default()
            }
        }
    }

    fn save(&mut self, key: &str, state: &ProgressState) -> Result<(), StorageError> {
        let raw = state
            .to_record()
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        self.write(key, &raw)
    }
}

impl<T: ProgressStore + ?Sized> ProgressStore for Box<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// The store selected by `persist_progress`: the on-disk database when
/// enabled, otherwise a store that remembers nothing.
///
/// A database that cannot be opened degrades to an in-memory store, so the
/// session still runs but is not saved.
pub fn open_configured(config: &Config) -> Box<dyn ProgressStore> {
    if config.persist_progress {
        or_unsaved(SqliteStore::open())
    } else {
        Box::new(NullStore)
    }
}

fn or_unsaved(opened: Result<SqliteStore, StorageError>) -> Box<dyn ProgressStore> {
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "progress store unavailable, session will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Task;

    #[test]
    fn unreadable_database_falls_back_to_memory() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("loveos.db");
        std::fs::write(&path, vec![b'x'; 4096]).unwrap();

        let opened = SqliteStore::open_at(&path);
        assert!(opened.is_err());

        let mut store = or_unsaved(opened);
        assert_eq!(store.load("k"), ProgressState::default());
        let mut state = ProgressState::default();
        state.set_done(Task::Why);
        store.save("k", &state).unwrap();
        assert!(store.load("k").why_done);
    }

    #[test]
    fn persistence_disabled_uses_null_store() {
        let config = Config {
            persist_progress: false,
            ..Config::default()
        };
        let mut store = open_configured(&config);
        let mut state = ProgressState::default();
        state.set_done(Task::Code);
        store.save("k", &state).unwrap();
        assert_eq!(store.load("k"), ProgressState::default());
    }
}
