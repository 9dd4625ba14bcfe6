//! Shared helpers for the HTTP-level integration tests.
//!
//! Tests drive the real router (full middleware stack) via
//! `tower::ServiceExt::oneshot`, posting urlencoded form bodies the way a
//! browser would and carrying the session cookie between requests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cinelog_api::auth::password::hash_password;
use cinelog_api::config::ServerConfig;
use cinelog_api::router::build_app_router;
use cinelog_api::state::AppState;
use cinelog_db::models::user::{CreateUser, User};
use cinelog_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        session_expiry_days: 14,
        request_timeout_secs: 30,
        cookie_secure: false,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Percent-encode form fields into an `application/x-www-form-urlencoded` body.
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Send a GET request, optionally carrying a session cookie.
pub async fn get(app: Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// POST a form body, optionally carrying a session cookie.
pub async fn post_form(
    app: Router,
    path: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = builder
        .body(Body::from(encode_form(fields)))
        .expect("request should build");
    app.oneshot(request).await.expect("request should not fail")
}

/// Collect the response body as a UTF-8 string.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("body should be UTF-8")
}

/// Extract the `name=value` pair of the session cookie from `Set-Cookie`,
/// if the response set one.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let header = response.headers().get(SET_COOKIE)?;
    let raw = header.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();
    pair.starts_with("cinelog_session=").then(|| pair.to_string())
}

/// The `Location` header of a redirect response.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("response must carry a Location header")
        .to_str()
        .expect("Location must be ASCII")
}

/// Create a user directly in the database, returning the row and the
/// plaintext password used.
pub async fn create_test_user(pool: &PgPool, username: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: None,
        password_hash: hashed,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log a user in through the API and return the session cookie pair.
pub async fn login_user(app: Router, username: &str, password: &str) -> String {
    let response = post_form(
        app,
        "/login",
        &[("username", username), ("password", password)],
        None,
    )
    .await;
    session_cookie(&response).expect("login must set a session cookie")
}
