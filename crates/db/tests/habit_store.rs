//! Integration tests for the habit store: habit CRUD, completion counting
//! over the day/ISO-week windows, and the undo path.
//!
//! Marks are seeded with explicit timestamps so window arithmetic is
//! deterministic regardless of when the suite runs.

use assert_matches::assert_matches;
use chrono::{DateTime, NaiveDate, Utc};
use ritual_core::habit::ScheduleType;
use ritual_core::window;
use ritual_db::models::habit::CreateHabit;
use ritual_db::models::user::CreateUser;
use ritual_db::repositories::{HabitRepo, MarkRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, email: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        display_name: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

fn new_habit(user_id: i64, name: &str, schedule: ScheduleType, frequency: i32) -> CreateHabit {
    CreateHabit {
        user_id,
        name: name.to_string(),
        schedule_type: schedule,
        target_frequency: frequency,
        color_rgb: "120,180,90".to_string(),
    }
}

fn at(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 timestamp")
}

fn d(s: &str) -> NaiveDate {
    s.parse().expect("valid date")
}

/// Insert a mark with an explicit timestamp to seed history.
async fn seed_mark(pool: &PgPool, habit_id: i64, created_at: DateTime<Utc>) {
    sqlx::query("INSERT INTO habit_marks (habit_id, created_at) VALUES ($1, $2)")
        .bind(habit_id)
        .bind(created_at)
        .execute(pool)
        .await
        .expect("mark insert should succeed");
}

// ---------------------------------------------------------------------------
// Habit CRUD
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn create_returns_row_with_defaults(pool: PgPool) {
    let user_id = seed_user(&pool, "crud@test.com").await;

    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Read", ScheduleType::Daily, 2))
        .await
        .expect("habit creation should succeed");

    assert_eq!(habit.user_id, user_id);
    assert_eq!(habit.name, "Read");
    assert_eq!(habit.schedule_type, "daily");
    assert_eq!(habit.target_frequency, 2);
    assert_eq!(habit.schedule().unwrap(), ScheduleType::Daily);
}

#[sqlx::test]
async fn duplicate_name_violates_unique_constraint(pool: PgPool) {
    let user_id = seed_user(&pool, "dup@test.com").await;

    HabitRepo::create(&pool, &new_habit(user_id, "Meditate", ScheduleType::Daily, 1))
        .await
        .expect("first creation should succeed");

    let err = HabitRepo::create(&pool, &new_habit(user_id, "Meditate", ScheduleType::Weekly, 3))
        .await
        .expect_err("duplicate name must be rejected");

    assert_matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.constraint() == Some("uq_habits_user_name")
    );
}

#[sqlx::test]
async fn same_name_for_different_users_is_allowed(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com").await;
    let bob = seed_user(&pool, "bob@test.com").await;

    HabitRepo::create(&pool, &new_habit(alice, "Run", ScheduleType::Daily, 1))
        .await
        .expect("alice's habit should succeed");
    HabitRepo::create(&pool, &new_habit(bob, "Run", ScheduleType::Daily, 1))
        .await
        .expect("bob's habit with the same name should succeed");
}

#[sqlx::test]
async fn delete_is_scoped_to_owner_and_cascades(pool: PgPool) {
    let owner = seed_user(&pool, "owner@test.com").await;
    let stranger = seed_user(&pool, "stranger@test.com").await;

    let habit = HabitRepo::create(&pool, &new_habit(owner, "Stretch", ScheduleType::Daily, 1))
        .await
        .expect("habit creation should succeed");
    MarkRepo::add(&pool, habit.id)
        .await
        .expect("mark should succeed");

    // A non-owner cannot delete.
    let deleted = HabitRepo::delete(&pool, habit.id, stranger)
        .await
        .expect("delete query should succeed");
    assert!(!deleted);

    let deleted = HabitRepo::delete(&pool, habit.id, owner)
        .await
        .expect("delete query should succeed");
    assert!(deleted);

    // The completion log cascades with the habit.
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habit_marks")
        .fetch_one(&pool)
        .await
        .expect("count query should succeed");
    assert_eq!(remaining, 0);
}

#[sqlx::test]
async fn quota_and_rate_counters(pool: PgPool) {
    let user_id = seed_user(&pool, "counts@test.com").await;

    for i in 0..3 {
        HabitRepo::create(
            &pool,
            &new_habit(user_id, &format!("Habit {i}"), ScheduleType::Daily, 1),
        )
        .await
        .expect("habit creation should succeed");
    }

    let total = HabitRepo::count_for_user(&pool, user_id)
        .await
        .expect("count should succeed");
    assert_eq!(total, 3);

    // All three were just created, so they fall inside any recent window.
    let recent = HabitRepo::created_since(&pool, user_id, Utc::now() - chrono::Duration::hours(1))
        .await
        .expect("count should succeed");
    assert_eq!(recent, 3);

    let none = HabitRepo::created_since(&pool, user_id, Utc::now() + chrono::Duration::hours(1))
        .await
        .expect("count should succeed");
    assert_eq!(none, 0);
}

// ---------------------------------------------------------------------------
// Counting windows
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn list_with_counts_splits_day_and_week(pool: PgPool) {
    let user_id = seed_user(&pool, "windows@test.com").await;
    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Water", ScheduleType::Daily, 3))
        .await
        .expect("habit creation should succeed");

    // Active date: Wednesday 2024-03-06 (ISO week 2024-03-04..2024-03-11).
    seed_mark(&pool, habit.id, at("2024-03-06T08:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-06T12:30:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-05T09:00:00Z")).await; // same week, prior day
    seed_mark(&pool, habit.id, at("2024-02-01T09:00:00Z")).await; // outside both windows

    let rows = HabitRepo::list_with_counts(&pool, user_id, d("2024-03-06"))
        .await
        .expect("list should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].daily_count, 2);
    assert_eq!(rows[0].weekly_count, 3);
}

#[sqlx::test]
async fn list_with_counts_returns_zero_for_unmarked_habits(pool: PgPool) {
    let user_id = seed_user(&pool, "zero@test.com").await;
    HabitRepo::create(&pool, &new_habit(user_id, "Journal", ScheduleType::Weekly, 2))
        .await
        .expect("habit creation should succeed");

    let rows = HabitRepo::list_with_counts(&pool, user_id, d("2024-03-06"))
        .await
        .expect("list should succeed");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].daily_count, 0);
    assert_eq!(rows[0].weekly_count, 0);
}

#[sqlx::test]
async fn mark_in_final_second_of_day_is_outside_window(pool: PgPool) {
    let user_id = seed_user(&pool, "lastsec@test.com").await;
    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Floss", ScheduleType::Daily, 1))
        .await
        .expect("habit creation should succeed");

    // The day window's upper bound is 23:59:59 exclusive.
    seed_mark(&pool, habit.id, at("2024-03-06T23:59:59Z")).await;

    let count = MarkRepo::count_in_window(&pool, habit.id, window::day_window(d("2024-03-06")))
        .await
        .expect("count should succeed");
    assert_eq!(count, 0);

    // It still lands inside the ISO-week window.
    let count = MarkRepo::count_in_window(&pool, habit.id, window::iso_week_window(d("2024-03-06")))
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Undo
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn undo_removes_only_the_latest_mark_in_the_day(pool: PgPool) {
    let user_id = seed_user(&pool, "undo@test.com").await;
    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Walk", ScheduleType::Daily, 2))
        .await
        .expect("habit creation should succeed");

    seed_mark(&pool, habit.id, at("2024-03-06T08:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-06T18:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-05T08:00:00Z")).await; // prior day, untouched

    let day = window::day_window(d("2024-03-06"));
    let removed = MarkRepo::remove_latest_in_window(&pool, habit.id, day)
        .await
        .expect("undo should succeed");
    assert!(removed);

    let count = MarkRepo::count_in_window(&pool, habit.id, day)
        .await
        .expect("count should succeed");
    assert_eq!(count, 1);

    // The earlier mark of the day survives as the newest remaining entry.
    let latest: DateTime<Utc> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM habit_marks WHERE habit_id = $1")
            .bind(habit.id)
            .fetch_one(&pool)
            .await
            .expect("query should succeed");
    assert_eq!(latest, at("2024-03-06T08:00:00Z"));
}

#[sqlx::test]
async fn undo_on_empty_window_is_a_noop(pool: PgPool) {
    let user_id = seed_user(&pool, "noop@test.com").await;
    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Swim", ScheduleType::Daily, 1))
        .await
        .expect("habit creation should succeed");

    // A mark exists, but on another day.
    seed_mark(&pool, habit.id, at("2024-03-05T08:00:00Z")).await;

    let day = window::day_window(d("2024-03-06"));
    let removed = MarkRepo::remove_latest_in_window(&pool, habit.id, day)
        .await
        .expect("undo should succeed");
    assert!(!removed, "undo with nothing in the window must be a no-op");

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM habit_marks WHERE habit_id = $1")
        .bind(habit.id)
        .fetch_one(&pool)
        .await
        .expect("count should succeed");
    assert_eq!(total, 1, "the out-of-window mark must survive");
}

// ---------------------------------------------------------------------------
// Distinct days
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn distinct_days_deduplicates_and_sorts_descending(pool: PgPool) {
    let user_id = seed_user(&pool, "days@test.com").await;
    let habit = HabitRepo::create(&pool, &new_habit(user_id, "Piano", ScheduleType::Daily, 1))
        .await
        .expect("habit creation should succeed");

    seed_mark(&pool, habit.id, at("2024-03-04T08:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-04T20:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-06T08:00:00Z")).await;
    seed_mark(&pool, habit.id, at("2024-03-01T08:00:00Z")).await;

    let days = MarkRepo::distinct_days(&pool, habit.id)
        .await
        .expect("distinct days should succeed");

    assert_eq!(days, vec![d("2024-03-06"), d("2024-03-04"), d("2024-03-01")]);
}
