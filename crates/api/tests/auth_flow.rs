//! HTTP-level integration tests for signup, login, and logout.

mod common;

use axum::http::StatusCode;
use common::{
    body_text, create_test_user, get, location, login_user, post_form, session_cookie,
};
use sqlx::PgPool;

use cinelog_db::repositories::{SessionRepo, UserRepo};

// ---------------------------------------------------------------------------
// Signup
// ---------------------------------------------------------------------------

/// Valid signup creates exactly one user, establishes a session, and
/// redirects to the index.
#[sqlx::test(migrations = "../db/migrations")]
async fn signup_creates_user_and_logs_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_form(
        app,
        "/signup",
        &[
            ("username", "alice"),
            ("email", ""),
            ("password", "long-enough-pw"),
            ("password_confirm", "long-enough-pw"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).expect("signup must set a session cookie");

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
    let user = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .expect("user must exist");
    assert_eq!(
        SessionRepo::count_active_for_user(&pool, user.id).await.unwrap(),
        1
    );

    // The cookie actually authenticates follow-up requests.
    let app = common::build_test_app(pool);
    let response = get(app, "/review/create", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Mismatched passwords re-render the form with an error and persist nothing.
#[sqlx::test(migrations = "../db/migrations")]
async fn signup_password_mismatch_rerenders(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_form(
        app,
        "/signup",
        &[
            ("username", "bob"),
            ("email", ""),
            ("password", "long-enough-pw"),
            ("password_confirm", "something-else"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Passwords do not match"));

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 0);
}

/// A taken username is reported as a field error, not a conflict page.
#[sqlx::test(migrations = "../db/migrations")]
async fn signup_duplicate_username_rerenders(pool: PgPool) {
    create_test_user(&pool, "taken").await;
    let app = common::build_test_app(pool.clone());

    let response = post_form(
        app,
        "/signup",
        &[
            ("username", "taken"),
            ("email", ""),
            ("password", "long-enough-pw"),
            ("password_confirm", "long-enough-pw"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("already taken"));

    assert_eq!(UserRepo::count(&pool).await.unwrap(), 1);
}

/// Authenticated visitors are redirected away from the signup page.
#[sqlx::test(migrations = "../db/migrations")]
async fn signup_redirects_when_authenticated(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "already").await;
    let cookie = login_user(common::build_test_app(pool.clone()), "already", &password).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/signup", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Valid login establishes a session and honors a same-site `next` target.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_success_honors_next(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "traveler").await;
    let app = common::build_test_app(pool.clone());

    let response = post_form(
        app,
        "/login?next=%2Freview%2Fcreate",
        &[("username", "traveler"), ("password", &password)],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/review/create");
    assert!(session_cookie(&response).is_some());
    assert_eq!(
        SessionRepo::count_active_for_user(&pool, user.id).await.unwrap(),
        1
    );
}

/// An off-site `next` target falls back to the index.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_offsite_next_falls_back_to_index(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "phished").await;
    let app = common::build_test_app(pool);

    let response = post_form(
        app,
        "/login?next=https%3A%2F%2Fevil.example",
        &[("username", "phished"), ("password", &password)],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

/// A backslash `next` target falls back to the index; browsers normalize
/// `\` to `/`, which would otherwise make it scheme-relative.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_backslash_next_falls_back_to_index(pool: PgPool) {
    let (_user, password) = create_test_user(&pool, "cautious").await;
    let app = common::build_test_app(pool);

    let response = post_form(
        app,
        "/login?next=%2F%5Cevil.example",
        &[("username", "cautious"), ("password", &password)],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

/// Wrong credentials leave no session and re-render with an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_leaves_no_session(pool: PgPool) {
    let (user, _password) = create_test_user(&pool, "careful").await;
    let app = common::build_test_app(pool.clone());

    let response = post_form(
        app,
        "/login",
        &[("username", "careful"), ("password", "incorrect")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    let body = body_text(response).await;
    assert!(body.contains("Invalid username or password"));

    assert_eq!(
        SessionRepo::count_active_for_user(&pool, user.id).await.unwrap(),
        0
    );
}

/// An unknown username behaves exactly like a wrong password.
#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_user_rerenders(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_form(
        app,
        "/login",
        &[("username", "ghost"), ("password", "whatever")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Invalid username or password"));
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout revokes the session, and the stale cookie no longer authenticates.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_revokes_session(pool: PgPool) {
    let (user, password) = create_test_user(&pool, "leaver").await;
    let cookie = login_user(common::build_test_app(pool.clone()), "leaver", &password).await;

    let app = common::build_test_app(pool.clone());
    let response = post_form(app, "/logout", &[], Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert_eq!(
        SessionRepo::count_active_for_user(&pool, user.id).await.unwrap(),
        0
    );

    // The revoked cookie must not authenticate a protected page.
    let app = common::build_test_app(pool);
    let response = get(app, "/review/create", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/login"));
}

/// Logout without a session still redirects to the index.
#[sqlx::test(migrations = "../db/migrations")]
async fn logout_without_session_redirects(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_form(app, "/logout", &[], None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}
