//! Handlers for the `/habits` resource: list with counts, derived streaks,
//! and progress; create; delete; mark done; undo last mark.
//!
//! Counts and streaks are derived from the completion log on every read, so
//! the values a client sees always reconcile with the log regardless of what
//! its optimistic local state did in the meantime.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use ritual_core::color::Rgb;
use ritual_core::error::CoreError;
use ritual_core::habit::{self, ScheduleType};
use ritual_core::progress::{self, Progress};
use ritual_core::streak::{self, StreakTier, StreakUpdate};
use ritual_core::types::{DbId, Timestamp};
use ritual_core::window;
use ritual_db::models::habit::{CreateHabit, Habit};
use ritual_db::repositories::{HabitRepo, MarkRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameter carrying the caller's local calendar date.
///
/// Defaults to the current UTC date when omitted.
#[derive(Debug, Deserialize)]
pub struct ActiveDateQuery {
    pub date: Option<NaiveDate>,
}

impl ActiveDateQuery {
    fn resolve(&self) -> NaiveDate {
        self.date.unwrap_or_else(window::today_utc)
    }
}

/// Request body for `POST /habits`.
#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    pub schedule_type: ScheduleType,
    pub target_frequency: i32,
    /// `"r,g,b"` triplet; a random color is assigned when omitted.
    pub color_rgb: Option<String>,
}

/// A habit with everything a card renders: counts for the active windows,
/// progress against the target, and streaks derived from the log.
#[derive(Debug, Serialize)]
pub struct HabitView {
    pub id: DbId,
    pub name: String,
    pub schedule_type: String,
    pub target_frequency: i32,
    pub color_rgb: String,
    pub created_at: Timestamp,
    pub daily_count: i64,
    pub weekly_count: i64,
    pub progress: Progress,
    /// Target over a 7-day span, display only.
    pub seven_day_target: i32,
    pub current_streak: i32,
    pub best_streak: i32,
    pub streak_tier: StreakTier,
    pub streak_message: &'static str,
}

/// Response body for `POST /habits/{id}/marks`.
#[derive(Debug, Serialize)]
pub struct MarkResponse {
    pub habit_id: DbId,
    pub mark_id: DbId,
    pub marked_on: NaiveDate,
    /// Streak after this completion, per the completion rule.
    pub streak: StreakUpdate,
    pub streak_tier: StreakTier,
    pub streak_message: &'static str,
    pub daily_count: i64,
    pub weekly_count: i64,
    pub progress: Progress,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/habits?date=YYYY-MM-DD
///
/// List the authenticated user's habits with completion counts, progress,
/// and streaks for the windows containing `date`.
pub async fn list_habits(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ActiveDateQuery>,
) -> AppResult<Json<DataResponse<Vec<HabitView>>>> {
    let day = query.resolve();
    let rows = HabitRepo::list_with_counts(&state.pool, auth_user.user_id, day).await?;

    let mut habits = Vec::with_capacity(rows.len());
    for row in rows {
        let schedule = row.schedule()?;
        let days = MarkRepo::distinct_days(&state.pool, row.id).await?;
        let current_streak = streak::current_streak_over(&days);
        let best_streak = streak::best_streak_over(&days);
        let tier = StreakTier::for_streak(current_streak);

        habits.push(HabitView {
            id: row.id,
            name: row.name,
            schedule_type: row.schedule_type,
            target_frequency: row.target_frequency,
            color_rgb: row.color_rgb,
            created_at: row.created_at,
            daily_count: row.daily_count,
            weekly_count: row.weekly_count,
            progress: progress::compute_progress(
                schedule,
                row.target_frequency,
                row.daily_count,
                row.weekly_count,
            ),
            seven_day_target: progress::seven_day_target(schedule, row.target_frequency),
            current_streak,
            best_streak,
            streak_tier: tier,
            streak_message: tier.message(),
        });
    }

    Ok(Json(DataResponse { data: habits }))
}

/// POST /api/v1/habits
///
/// Create a habit. The name is trimmed and validated, the per-user quota and
/// creation rate limit are enforced, and a duplicate name surfaces as 409
/// via the unique constraint.
pub async fn create_habit(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHabitRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Habit>>)> {
    let name = input.name.trim().to_string();
    habit::validate_name(&name)?;
    habit::validate_target_frequency(input.target_frequency)?;

    let color = match &input.color_rgb {
        Some(raw) => raw.parse::<Rgb>()?,
        None => Rgb::random(),
    };

    let count = HabitRepo::count_for_user(&state.pool, auth_user.user_id).await?;
    if count >= habit::MAX_HABITS_PER_USER {
        return Err(CoreError::QuotaExceeded(format!(
            "Maximum number of habits ({}) reached. Delete a habit before creating a new one",
            habit::MAX_HABITS_PER_USER
        ))
        .into());
    }

    let since = Utc::now() - chrono::Duration::seconds(habit::CREATE_RATE_WINDOW_SECS);
    let recent = HabitRepo::created_since(&state.pool, auth_user.user_id, since).await?;
    if recent >= habit::CREATE_RATE_LIMIT {
        return Err(CoreError::RateLimited(
            "You're creating habits too quickly. Wait a moment before creating another".into(),
        )
        .into());
    }

    let create = CreateHabit {
        user_id: auth_user.user_id,
        name,
        schedule_type: input.schedule_type,
        target_frequency: input.target_frequency,
        color_rgb: color.to_string(),
    };
    let created = HabitRepo::create(&state.pool, &create).await?;

    tracing::info!(
        user_id = auth_user.user_id,
        habit_id = created.id,
        schedule = %created.schedule_type,
        "Habit created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// DELETE /api/v1/habits/{id}
///
/// Delete a habit and (via cascade) its completion log. 404 when the habit
/// does not exist or belongs to another user.
pub async fn delete_habit(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = HabitRepo::delete(&state.pool, id, auth_user.user_id).await?;
    if !deleted {
        return Err(CoreError::NotFound { entity: "habit", id }.into());
    }

    tracing::info!(user_id = auth_user.user_id, habit_id = id, "Habit deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/habits/{id}/marks?date=YYYY-MM-DD
///
/// Append one completion event and report the resulting streak and counts.
///
/// The streak in the response follows the completion rule fed with the
/// pre-insert log state, so a repeat completion on the same day resets it;
/// the derived values in the habit list are unaffected.
pub async fn mark_done(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ActiveDateQuery>,
) -> AppResult<Json<DataResponse<MarkResponse>>> {
    let habit = HabitRepo::find_owned(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "habit", id })?;
    let schedule = habit.schedule()?;
    let day = query.resolve();

    let days_before = MarkRepo::distinct_days(&state.pool, id).await?;
    let prior_current = streak::current_streak_over(&days_before);
    let prior_best = streak::best_streak_over(&days_before);
    let last_completed = days_before.first().copied();

    let mark = MarkRepo::add(&state.pool, id).await?;
    let update = streak::apply_completion(prior_current, prior_best, last_completed, day);

    let daily_count = MarkRepo::count_in_window(&state.pool, id, window::day_window(day)).await?;
    let weekly_count =
        MarkRepo::count_in_window(&state.pool, id, window::iso_week_window(day)).await?;
    let tier = StreakTier::for_streak(update.current);

    tracing::info!(
        user_id = auth_user.user_id,
        habit_id = id,
        streak = update.current,
        "Habit marked done",
    );

    Ok(Json(DataResponse {
        data: MarkResponse {
            habit_id: id,
            mark_id: mark.id,
            marked_on: day,
            streak: update,
            streak_tier: tier,
            streak_message: tier.message(),
            daily_count,
            weekly_count,
            progress: progress::compute_progress(
                schedule,
                habit.target_frequency,
                daily_count,
                weekly_count,
            ),
        },
    }))
}

/// DELETE /api/v1/habits/{id}/marks/latest?date=YYYY-MM-DD
///
/// Undo the most recent completion within the day window. A no-op when the
/// window holds no completions, so the count can never go negative. Returns
/// 204 either way.
pub async fn undo_last_mark(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ActiveDateQuery>,
) -> AppResult<StatusCode> {
    HabitRepo::find_owned(&state.pool, id, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound { entity: "habit", id })?;
    let day = query.resolve();

    let removed =
        MarkRepo::remove_latest_in_window(&state.pool, id, window::day_window(day)).await?;
    if removed {
        tracing::info!(user_id = auth_user.user_id, habit_id = id, "Mark undone");
    }

    Ok(StatusCode::NO_CONTENT)
}
