//! TOML-based application configuration.
//!
//! Stores:
//! - The passcode (lock answer and storage-key input)
//! - The start date used for the "days online" counter
//! - Whether progress persists between sessions
//! - Widget tuning (heart fill, quiz pacing) and the final-stage delay
//!
//! Configuration is stored at `~/.config/loveos/config.toml`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::progress::DEFAULT_FINAL_STAGE_DELAY_MS;

/// Heart monitor tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartConfig {
    #[serde(default = "default_max_fill")]
    pub max_fill: u32,
    #[serde(default = "default_fill_step")]
    pub step: u32,
    /// Clicks past full needed to reveal the message.
    #[serde(default = "default_over_clicks")]
    pub over_clicks_required: u32,
}

/// Quiz pacing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default = "default_advance_delay")]
    pub advance_delay_ms: u64,
    /// The last question lingers longer on its correct answer.
    #[serde(default = "default_final_advance_delay")]
    pub final_advance_delay_ms: u64,
    #[serde(default = "default_wrong_feedback")]
    pub wrong_feedback_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/loveos/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_passcode")]
    pub passcode: String,
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "default_her_name")]
    pub her_name: String,
    #[serde(default = "default_true")]
    pub persist_progress: bool,
    #[serde(default = "default_final_stage_delay")]
    pub final_stage_delay_ms: u64,
    #[serde(default)]
    pub heart: HeartConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
}

// Default functions
fn default_passcode() -> String {
    "21122025".into()
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 21).unwrap_or_default()
}
fn default_her_name() -> String {
    "Martina".into()
}
fn default_true() -> bool {
    true
}
fn default_final_stage_delay() -> u64 {
    DEFAULT_FINAL_STAGE_DELAY_MS
}
fn default_max_fill() -> u32 {
    90
}
fn default_fill_step() -> u32 {
    10
}
fn default_over_clicks() -> u32 {
    2
}
fn default_advance_delay() -> u64 {
    1_800
}
fn default_final_advance_delay() -> u64 {
    5_000
}
fn default_wrong_feedback() -> u64 {
    1_800
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            max_fill: default_max_fill(),
            step: default_fill_step(),
            over_clicks_required: default_over_clicks(),
        }
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay(),
            final_advance_delay_ms: default_final_advance_delay(),
            wrong_feedback_ms: default_wrong_feedback(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            passcode: default_passcode(),
            start_date: default_start_date(),
            her_name: default_her_name(),
            persist_progress: true,
            final_stage_delay_ms: default_final_stage_delay(),
            heart: HeartConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("not a leaf value".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Default location: `<data_dir>/config.toml`.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// # Errors
    ///
    /// Same as [`Config::load`], for an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// # Errors
    ///
    /// Same as [`Config::save`], for an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Call [`Config::save`] to persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse
    /// for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
