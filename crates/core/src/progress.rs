//! Progress against a habit's target frequency for the current period.

use serde::Serialize;

use crate::habit::ScheduleType;

/// Progress of a habit within its active counting window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    /// Completions in the active window (day for daily, ISO week for weekly).
    pub current_count: i64,
    /// The habit's target frequency.
    pub target_count: i32,
    /// Unclamped percentage; may exceed 100 on over-achievement.
    pub raw_percentage: f64,
    /// Percentage clamped to `[0, 100]` for rendering.
    pub display_percentage: f64,
    pub goal_achieved: bool,
    /// Completions beyond the target; 0 unless the goal is achieved.
    pub over_achievement: i64,
}

/// Compute progress from the counts the store derives for the current
/// day and ISO week.
pub fn compute_progress(
    schedule: ScheduleType,
    target_frequency: i32,
    daily_count: i64,
    weekly_count: i64,
) -> Progress {
    let current_count = match schedule {
        ScheduleType::Daily => daily_count,
        ScheduleType::Weekly => weekly_count,
    }
    .max(0);
    let target = i64::from(target_frequency.max(1));

    let raw_percentage = current_count as f64 / target as f64 * 100.0;

    Progress {
        current_count,
        target_count: target_frequency,
        raw_percentage,
        display_percentage: raw_percentage.clamp(0.0, 100.0),
        goal_achieved: current_count >= target,
        over_achievement: (current_count - target).max(0),
    }
}

/// Target over a 7-day span, for display only: a daily habit's frequency
/// scales by 7, a weekly habit's already spans the week.
pub fn seven_day_target(schedule: ScheduleType, target_frequency: i32) -> i32 {
    match schedule {
        ScheduleType::Daily => target_frequency * 7,
        ScheduleType::Weekly => target_frequency,
    }
}
