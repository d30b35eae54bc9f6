//! Habit completion event ("mark") model.

use ritual_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One completion event from the append-only `habit_marks` log.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HabitMark {
    pub id: DbId,
    pub habit_id: DbId,
    pub created_at: Timestamp,
}
