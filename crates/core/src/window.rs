//! Counting windows for completion-date filtering.
//!
//! Both windows are anchored in UTC from a caller-supplied calendar date
//! (clients pass their local date; the server defaults to the current UTC
//! date).

use chrono::{Duration, NaiveDate, NaiveTime, Utc, Weekday};

use crate::types::Timestamp;

/// Half-open timestamp range `[start, end)`.
pub type Window = (Timestamp, Timestamp);

/// Day window for `day`: `[00:00:00, 23:59:59)`.
///
/// The upper bound excludes the final second of the day. Marks placed in
/// that second are invisible to same-day filtering; kept as observed
/// behavior.
pub fn day_window(day: NaiveDate) -> Window {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    let end = day
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid wall-clock time")
        .and_utc();
    (start, end)
}

/// ISO-week window containing `day`: Monday 00:00:00 inclusive through the
/// following Monday exclusive.
pub fn iso_week_window(day: NaiveDate) -> Window {
    let monday = day.week(Weekday::Mon).first_day();
    let start = monday.and_time(NaiveTime::MIN).and_utc();
    let end = (monday + Duration::days(7)).and_time(NaiveTime::MIN).and_utc();
    (start, end)
}

/// The current UTC calendar date.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
