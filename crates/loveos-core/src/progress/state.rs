//! Task flags and the values derived from them.
//!
//! ## Levels
//!
//! ```text
//! Level 1: why + heart + code   -> Level 2 unlocked
//! Level 2: questions            -> Level 3 unlocked (terminal)
//! ```

use serde::{Deserialize, Serialize};

/// One of the four gated interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    /// Reasons panel: every card opened at least once.
    Why,
    /// Heart monitor: filled and confirmed.
    Heart,
    /// Surprise lock: passcode matched.
    Code,
    /// Quiz: every question answered in order.
    Questions,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Why, Task::Heart, Task::Code, Task::Questions];

    /// Level whose gate must be open for this task to accept input.
    pub fn level(self) -> u8 {
        match self {
            Task::Why | Task::Heart | Task::Code => 1,
            Task::Questions => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Why => "why",
            Task::Heart => "heart",
            Task::Code => "code",
            Task::Questions => "questions",
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "why" => Ok(Task::Why),
            "heart" => Ok(Task::Heart),
            "code" => Ok(Task::Code),
            "questions" => Ok(Task::Questions),
            other => Err(format!("unknown task: {other}")),
        }
    }
}

/// The four completion flags.
///
/// Serialized with the field names of the persisted record
/// (`whyDone`, `heartDone`, `codeDone`, `questionsDone`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressState {
    pub why_done: bool,
    pub heart_done: bool,
    pub code_done: bool,
    pub questions_done: bool,
}

impl ProgressState {
    pub fn is_done(&self, task: Task) -> bool {
        match task {
            Task::Why => self.why_done,
            Task::Heart => self.heart_done,
            Task::Code => self.code_done,
            Task::Questions => self.questions_done,
        }
    }

    /// Set a flag. Returns `true` only on a false -> true transition.
    pub(crate) fn set_done(&mut self, task: Task) -> bool {
        let flag = match task {
            Task::Why => &mut self.why_done,
            Task::Heart => &mut self.heart_done,
            Task::Code => &mut self.code_done,
            Task::Questions => &mut self.questions_done,
        };
        let changed = !*flag;
        *flag = true;
        changed
    }

    pub fn level1_complete(&self) -> bool {
        self.why_done && self.heart_done && self.code_done
    }

    pub fn level2_unlocked(&self) -> bool {
        self.level1_complete()
    }

    pub fn level2_complete(&self) -> bool {
        self.level2_unlocked() && self.questions_done
    }

    pub fn level3_unlocked(&self) -> bool {
        self.level2_complete()
    }

    /// Highest level whose unlock condition holds.
    pub fn current_level(&self) -> u8 {
        if self.level3_unlocked() {
            3
        } else if self.level2_unlocked() {
            2
        } else {
            1
        }
    }

    /// 0..=100 display progress.
    ///
    /// 20 per level-1 task, 30 for the quiz once level 1 is complete,
    /// 10 when level 3 opens.
    pub fn progress_percent(&self) -> u8 {
        let level1_count = [self.why_done, self.heart_done, self.code_done]
            .iter()
            .filter(|done| **done)
            .count() as u32;
        let mut pct = level1_count * 20;
        if self.questions_done && self.level1_complete() {
            pct += 30;
        }
        if self.level3_unlocked() {
            pct += 10;
        }
        pct.min(100) as u8
    }

    pub fn derived(&self) -> Derived {
        Derived {
            current_level: self.current_level(),
            progress_percent: self.progress_percent(),
            level1_complete: self.level1_complete(),
            level2_unlocked: self.level2_unlocked(),
            level2_complete: self.level2_complete(),
            level3_unlocked: self.level3_unlocked(),
        }
    }

    /// Decode a persisted record.
    ///
    /// Never fails: text that is not a JSON object yields the all-false
    /// state, and each field is coerced by truthiness with absent fields
    /// reading as false.
    pub fn from_record(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let field = |name: &str| obj.get(name).map(truthy).unwrap_or(false);
        Self {
            why_done: field("whyDone"),
            heart_done: field("heartDone"),
            code_done: field("codeDone"),
            questions_done: field("questionsDone"),
        }
    }

    /// Encode as a persisted record.
    pub fn to_record(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Gating and display values derived from a [`ProgressState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Derived {
    pub current_level: u8,
    pub progress_percent: u8,
    pub level1_complete: bool,
    pub level2_unlocked: bool,
    pub level2_complete: bool,
    pub level3_unlocked: bool,
}

impl Derived {
    /// Whether the gate for `level` is open.
    pub fn level_open(&self, level: u8) -> bool {
        match level {
            0 | 1 => true,
            2 => self.level2_unlocked,
            3 => self.level3_unlocked,
            _ => false,
        }
    }
}
