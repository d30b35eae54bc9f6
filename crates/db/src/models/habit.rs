//! Habit entity model and DTOs.

use ritual_core::error::CoreError;
use ritual_core::habit::ScheduleType;
use ritual_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full habit row from the `habits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Habit {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub schedule_type: String,
    pub target_frequency: i32,
    pub color_rgb: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Habit {
    /// Parse the stored schedule type. The column carries a `ck_` check
    /// constraint, so a failure here means the row predates the schema.
    pub fn schedule(&self) -> Result<ScheduleType, CoreError> {
        self.schedule_type.parse()
    }
}

/// Habit row joined with completion counts for the active day and ISO-week
/// windows. One row per habit from the grouped list query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HabitWithCounts {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub schedule_type: String,
    pub target_frequency: i32,
    pub color_rgb: String,
    pub created_at: Timestamp,
    pub daily_count: i64,
    pub weekly_count: i64,
}

impl HabitWithCounts {
    pub fn schedule(&self) -> Result<ScheduleType, CoreError> {
        self.schedule_type.parse()
    }
}

/// DTO for creating a new habit. Fields are validated by the caller before
/// insert; the database constraints are backstops.
#[derive(Debug)]
pub struct CreateHabit {
    pub user_id: DbId,
    pub name: String,
    pub schedule_type: ScheduleType,
    pub target_frequency: i32,
    pub color_rgb: String,
}
