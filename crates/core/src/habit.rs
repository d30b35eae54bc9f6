//! Habit domain rules: schedule types, name and frequency validation, and
//! per-user creation limits.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum number of habits a single user may hold at once.
pub const MAX_HABITS_PER_USER: i64 = 50;

/// Maximum habit creations per user within [`CREATE_RATE_WINDOW_SECS`].
pub const CREATE_RATE_LIMIT: i64 = 5;

/// Rolling window for the creation rate limit, in seconds.
pub const CREATE_RATE_WINDOW_SECS: i64 = 60;

/// Habit names are 1..=100 characters after trimming.
pub const MAX_NAME_LEN: usize = 100;

/// Target frequency bounds (times per day or per week).
pub const MIN_TARGET_FREQUENCY: i32 = 1;
pub const MAX_TARGET_FREQUENCY: i32 = 100;

/// Letters, digits, spaces, and basic punctuation only.
static NAME_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s\-_.,!?()]+$").expect("valid name regex"));

/// The counting window a habit's target frequency applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleType {
    Daily,
    Weekly,
}

impl ScheduleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleType::Daily => "daily",
            ScheduleType::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ScheduleType::Daily),
            "weekly" => Ok(ScheduleType::Weekly),
            other => Err(CoreError::Validation(format!(
                "Unknown schedule type '{other}'. Valid: daily, weekly"
            ))),
        }
    }
}

/// Validate a habit name. Callers trim the input first.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::Validation("Habit name must not be empty".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Habit name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    if !NAME_FORMAT.is_match(name) {
        return Err(CoreError::Validation(
            "Habit name contains invalid characters. Use only letters, numbers, spaces, \
             and basic punctuation"
                .into(),
        ));
    }
    Ok(())
}

/// Validate a target frequency is within `1..=100`.
pub fn validate_target_frequency(frequency: i32) -> Result<(), CoreError> {
    if (MIN_TARGET_FREQUENCY..=MAX_TARGET_FREQUENCY).contains(&frequency) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Target frequency must be between {MIN_TARGET_FREQUENCY} and {MAX_TARGET_FREQUENCY}"
        )))
    }
}
