//! Repository for the `habits` table.

use chrono::NaiveDate;
use ritual_core::types::{DbId, Timestamp};
use ritual_core::window;
use sqlx::PgPool;

use crate::models::habit::{CreateHabit, Habit, HabitWithCounts};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, name, schedule_type, target_frequency, color_rgb, created_at, updated_at";

/// Provides CRUD operations for habits.
pub struct HabitRepo;

impl HabitRepo {
    /// Insert a new habit, returning the created row.
    ///
    /// A duplicate name for the same user violates `uq_habits_user_name`.
    pub async fn create(pool: &PgPool, input: &CreateHabit) -> Result<Habit, sqlx::Error> {
        let query = format!(
            "INSERT INTO habits (user_id, name, schedule_type, target_frequency, color_rgb)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Habit>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(input.schedule_type.as_str())
            .bind(input.target_frequency)
            .bind(&input.color_rgb)
            .fetch_one(pool)
            .await
    }

    /// Find a habit by ID, scoped to its owner.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Habit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM habits WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Habit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a habit, scoped to its owner. The completion log cascades.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a user's habits, for the per-user quota.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM habits WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Count habits a user created at or after `since`, for the creation
    /// rate limit. Deleted habits leave the window, so the limit is an
    /// approximation biased in the user's favor.
    pub async fn created_since(
        pool: &PgPool,
        user_id: DbId,
        since: Timestamp,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM habits WHERE user_id = $1 AND created_at >= $2")
            .bind(user_id)
            .bind(since)
            .fetch_one(pool)
            .await
    }

    /// List a user's habits with completion counts for the day and ISO-week
    /// windows containing `day`, most recently created first.
    ///
    /// This is the one grouped query behind the habit list: counts are
    /// derived from the log on every read rather than maintained as
    /// separately-mutated counters.
    pub async fn list_with_counts(
        pool: &PgPool,
        user_id: DbId,
        day: NaiveDate,
    ) -> Result<Vec<HabitWithCounts>, sqlx::Error> {
        let (day_start, day_end) = window::day_window(day);
        let (week_start, week_end) = window::iso_week_window(day);

        sqlx::query_as::<_, HabitWithCounts>(
            "SELECT h.id, h.user_id, h.name, h.schedule_type, h.target_frequency, h.color_rgb,
                    h.created_at,
                    COUNT(m.id) FILTER (WHERE m.created_at >= $2 AND m.created_at < $3)
                        AS daily_count,
                    COUNT(m.id) FILTER (WHERE m.created_at >= $4 AND m.created_at < $5)
                        AS weekly_count
               FROM habits h
               LEFT JOIN habit_marks m ON m.habit_id = h.id
              WHERE h.user_id = $1
              GROUP BY h.id
              ORDER BY h.created_at DESC",
        )
        .bind(user_id)
        .bind(day_start)
        .bind(day_end)
        .bind(week_start)
        .bind(week_end)
        .fetch_all(pool)
        .await
    }
}
