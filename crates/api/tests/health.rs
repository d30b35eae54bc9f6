//! HTTP-level tests for the root health endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

/// With a live database the service reports `ok` and `db_healthy: true`.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_ok(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert!(json["version"].is_string());
}

/// The health endpoint carries a request id assigned by the middleware.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_sets_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/health").await;
    assert!(
        response.headers().contains_key("x-request-id"),
        "response must carry x-request-id"
    );
}
