//! Health endpoint and cross-cutting middleware behavior.

mod common;

use axum::http::StatusCode;
use common::{body_text, get};
use sqlx::PgPool;

/// The health endpoint reports status, crate version, and database health.
#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value =
        serde_json::from_str(&body_text(response).await).expect("health body must be JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

/// Every response carries the request ID set by the middleware stack.
#[sqlx::test(migrations = "../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health", None).await;

    assert!(
        response.headers().contains_key("x-request-id"),
        "middleware must attach a request id"
    );
}

/// Unmatched routes render the HTML 404 page.
#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_renders_not_found_page(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/no/such/page", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("does not exist"));
}
