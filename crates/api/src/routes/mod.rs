pub mod auth;
pub mod habits;
pub mod health;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register               register (public)
/// /auth/login                  login (public)
/// /auth/refresh                refresh (public)
/// /auth/logout                 logout (requires auth)
///
/// /user/profile                get profile (requires auth)
/// /user/password               change password (PUT, requires auth)
///
/// /habits                      list (GET), create (POST)
/// /habits/{id}                 delete (DELETE)
/// /habits/{id}/marks           mark done (POST)
/// /habits/{id}/marks/latest    undo last mark (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", user::router())
        .nest("/habits", habits::router())
}
