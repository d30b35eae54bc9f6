//! Route definitions for habits and their completion marks.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// Routes mounted at `/habits`.
///
/// ```text
/// GET    /                    -> list_habits
/// POST   /                    -> create_habit
/// DELETE /{id}                -> delete_habit
/// POST   /{id}/marks          -> mark_done
/// DELETE /{id}/marks/latest   -> undo_last_mark
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habits::list_habits).post(habits::create_habit))
        .route("/{id}", delete(habits::delete_habit))
        .route("/{id}/marks", post(habits::mark_done))
        .route("/{id}/marks/latest", delete(habits::undo_last_mark))
}
