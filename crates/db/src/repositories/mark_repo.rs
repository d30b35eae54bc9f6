//! Repository for the append-only `habit_marks` log.

use chrono::NaiveDate;
use ritual_core::types::DbId;
use ritual_core::window::Window;
use sqlx::PgPool;

use crate::models::mark::HabitMark;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, habit_id, created_at";

/// Provides operations on habit completion events.
pub struct MarkRepo;

impl MarkRepo {
    /// Append one completion event timestamped now.
    pub async fn add(pool: &PgPool, habit_id: DbId) -> Result<HabitMark, sqlx::Error> {
        let query = format!(
            "INSERT INTO habit_marks (habit_id)
             VALUES ($1)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HabitMark>(&query)
            .bind(habit_id)
            .fetch_one(pool)
            .await
    }

    /// Delete the single most recent completion event within `window`.
    ///
    /// Returns `false` (a no-op) when the window holds no events, so undo
    /// can never drive a count negative.
    pub async fn remove_latest_in_window(
        pool: &PgPool,
        habit_id: DbId,
        window: Window,
    ) -> Result<bool, sqlx::Error> {
        let (start, end) = window;
        let result = sqlx::query(
            "DELETE FROM habit_marks
              WHERE id = (
                    SELECT id FROM habit_marks
                     WHERE habit_id = $1 AND created_at >= $2 AND created_at < $3
                     ORDER BY created_at DESC, id DESC
                     LIMIT 1)",
        )
        .bind(habit_id)
        .bind(start)
        .bind(end)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count completion events for a habit within `window`.
    pub async fn count_in_window(
        pool: &PgPool,
        habit_id: DbId,
        window: Window,
    ) -> Result<i64, sqlx::Error> {
        let (start, end) = window;
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM habit_marks
              WHERE habit_id = $1 AND created_at >= $2 AND created_at < $3",
        )
        .bind(habit_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    /// Distinct completion dates for a habit, most recent first.
    ///
    /// Feeds the derived streak calculators; dates are taken from the UTC
    /// calendar.
    pub async fn distinct_days(
        pool: &PgPool,
        habit_id: DbId,
    ) -> Result<Vec<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT (created_at AT TIME ZONE 'UTC')::date AS day
               FROM habit_marks
              WHERE habit_id = $1
              ORDER BY day DESC",
        )
        .bind(habit_id)
        .fetch_all(pool)
        .await
    }
}
