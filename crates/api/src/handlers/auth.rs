//! Handlers for signup, login, and logout.
//!
//! Already-authenticated visitors are redirected away from the signup and
//! login pages. Failed validation re-renders the originating form with field
//! errors and HTTP 200.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, SameSite};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use cinelog_core::types::DbId;
use cinelog_db::models::session::CreateSession;
use cinelog_db::models::user::CreateUser;
use cinelog_db::repositories::{SessionRepo, UserRepo};
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::session::{generate_session_token, hash_session_token, SESSION_COOKIE};
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::forms::{field_errors, LoginForm, SignupForm};
use crate::middleware::auth::AuthUser;
use crate::pages;
use crate::state::AppState;

/// Optional `?next=` query parameter on the login page.
#[derive(Debug, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}

/// Only same-site absolute paths are honored as redirect targets;
/// anything else falls back to the index.
///
/// Backslashes are rejected outright: browsers normalize `\` to `/` in
/// Location headers, so `/\evil.example` would resolve as the
/// scheme-relative `//evil.example`.
fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') =>
        {
            path
        }
        _ => "/",
    }
}

/// Persist a fresh session for `user_id` and build its cookie.
async fn start_session(state: &AppState, user_id: DbId) -> AppResult<Cookie<'static>> {
    let (plaintext, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::days(state.config.session_expiry_days);

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    let cookie = Cookie::build((SESSION_COOKIE, plaintext))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.config.cookie_secure)
        .build();
    Ok(cookie)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /signup
pub async fn signup_form(user: Option<AuthUser>) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    pages::signup_page(&SignupForm::default(), &[]).into_response()
}

/// POST /signup
///
/// Creates the user, starts a session, and redirects to the index. A taken
/// username is reported as a field error rather than a conflict page.
pub async fn signup(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    if let Err(errors) = form.validate() {
        return Ok(pages::signup_page(&form, &field_errors(&errors)).into_response());
    }

    let password_hash = hash_password(&form.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        username: form.username.clone(),
        email: form.email_or_none(),
        password_hash,
    };

    let created = match UserRepo::create(&state.pool, &input).await {
        Ok(created) => created,
        Err(err) if is_unique_violation(&err, "uq_users_username") => {
            let errors = vec![(
                "username".to_string(),
                "This username is already taken".to_string(),
            )];
            return Ok(pages::signup_page(&form, &errors).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = created.id, "New user signed up");

    let cookie = start_session(&state, created.id).await?;
    Ok((jar.add(cookie), Redirect::to("/")).into_response())
}

/// GET /login
pub async fn login_form(user: Option<AuthUser>, Query(query): Query<NextQuery>) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }
    pages::login_page("", query.next.as_deref(), &[]).into_response()
}

/// POST /login
///
/// On success starts a session and redirects to the `next` target or the
/// index. Failures re-render with a single error that does not reveal
/// whether the username exists.
pub async fn login(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Query(query): Query<NextQuery>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if user.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let next = query.next.as_deref();

    let rerender = |username: &str, next: Option<&str>| -> Html<String> {
        let errors = vec![(
            "login".to_string(),
            "Invalid username or password".to_string(),
        )];
        pages::login_page(username, next, &errors)
    };

    let account = match UserRepo::find_by_username(&state.pool, &form.username).await? {
        Some(account) => account,
        None => return Ok(rerender(&form.username, next).into_response()),
    };

    let verified = verify_password(&form.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !verified {
        return Ok(rerender(&form.username, next).into_response());
    }

    tracing::info!(user_id = account.id, "User logged in");

    let cookie = start_session(&state, account.id).await?;
    Ok((jar.add(cookie), Redirect::to(safe_next(next))).into_response())
}

/// POST /logout
///
/// Revokes the current session if one exists, clears the cookie, and
/// redirects to the index regardless.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<Response> {
    let jar = match jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let token_hash = hash_session_token(cookie.value());
            SessionRepo::revoke_by_token_hash(&state.pool, &token_hash).await?;
            jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
        }
        None => jar,
    };
    Ok((jar, Redirect::to("/")).into_response())
}
