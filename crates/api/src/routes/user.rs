//! Route definitions for the authenticated user's profile.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET /profile   -> get_profile
/// PUT /password  -> change_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", get(user::get_profile))
        .route("/password", put(user::change_password))
}
