//! Streak calculation over habit completion dates.
//!
//! Two calculators coexist. [`next_streak`] is the event-based rule applied
//! when a completion is recorded: it sees only the previous streak and the
//! last completion date, and resets on any whole-day difference other than
//! exactly 1 -- including a same-day repeat, which is long-standing observed
//! behavior. [`current_streak_over`] and [`best_streak_over`] derive streaks
//! from the distinct completion dates in the log and are used on every read,
//! so the displayed values self-heal from the log regardless of write-path
//! failures.

use chrono::NaiveDate;
use serde::Serialize;

/// Streak value after recording a completion on `completed_on`.
///
/// - No prior completion: 1.
/// - Exactly one day after `last_completed`: `current_streak + 1`.
/// - Any other gap (same day, more than one day, or negative): 1.
pub fn next_streak(
    current_streak: i32,
    last_completed: Option<NaiveDate>,
    completed_on: NaiveDate,
) -> i32 {
    let Some(last) = last_completed else {
        return 1;
    };
    if (completed_on - last).num_days() == 1 {
        current_streak + 1
    } else {
        1
    }
}

/// Result of applying a completion to a habit's streak state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub current: i32,
    pub best: i32,
}

/// Apply a completion: advance the current streak per [`next_streak`] and
/// keep the best streak monotonically non-decreasing.
pub fn apply_completion(
    current_streak: i32,
    best_streak: i32,
    last_completed: Option<NaiveDate>,
    completed_on: NaiveDate,
) -> StreakUpdate {
    let current = next_streak(current_streak, last_completed, completed_on);
    StreakUpdate {
        current,
        best: best_streak.max(current),
    }
}

/// Consecutive-day run ending at the most recent completion date.
///
/// `days` must hold distinct dates in descending order, as returned by the
/// mark repository.
pub fn current_streak_over(days: &[NaiveDate]) -> i32 {
    let Some((&latest, rest)) = days.split_first() else {
        return 0;
    };
    let mut streak = 1;
    let mut prev = latest;
    for &day in rest {
        if (prev - day).num_days() == 1 {
            streak += 1;
            prev = day;
        } else {
            break;
        }
    }
    streak
}

/// Longest consecutive-day run anywhere in the log.
///
/// `days` must hold distinct dates in descending order.
pub fn best_streak_over(days: &[NaiveDate]) -> i32 {
    let Some((&first, rest)) = days.split_first() else {
        return 0;
    };
    let mut best = 1;
    let mut run = 1;
    let mut prev = first;
    for &day in rest {
        if (prev - day).num_days() == 1 {
            run += 1;
        } else {
            run = 1;
        }
        best = best.max(run);
        prev = day;
    }
    best
}

/// Display tier for a streak value, collapsed from the presentation logic
/// into a single parameterization any renderer can consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    Cold,
    Momentum,
    Consistent,
    Legendary,
}

impl StreakTier {
    pub fn for_streak(streak: i32) -> Self {
        if streak <= 0 {
            StreakTier::Cold
        } else if streak < 7 {
            StreakTier::Momentum
        } else if streak < 30 {
            StreakTier::Consistent
        } else {
            StreakTier::Legendary
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StreakTier::Cold => "Start your streak!",
            StreakTier::Momentum => "Building momentum",
            StreakTier::Consistent => "Great consistency!",
            StreakTier::Legendary => "Legendary streak!",
        }
    }
}
