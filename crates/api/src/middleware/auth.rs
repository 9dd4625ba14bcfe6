//! Session-cookie authentication extractors for Axum handlers.
//!
//! The session cookie carries an opaque token; its SHA-256 digest is looked
//! up in the `sessions` table and resolved to a user row.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;
use cinelog_db::repositories::{SessionRepo, UserRepo};

use crate::auth::session::{hash_session_token, SESSION_COOKIE};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; unauthenticated requests are redirected to the login page
/// with a `next` parameter pointing back at the requested path. Handlers that
/// behave differently for anonymous visitors take `Option<AuthUser>` instead.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id.
    pub user_id: DbId,
    /// The user's username, rendered in the page header.
    pub username: String,
    /// Whether the user may access the operator pages.
    pub is_admin: bool,
}

/// Rejection for the auth extractors: either a redirect to the login page
/// (anonymous visitor on a protected page) or an application error.
#[derive(Debug)]
pub enum AuthRejection {
    /// Redirect to `/login?next=<target>`.
    LoginRedirect(String),
    /// Propagated application error (database failure, forbidden, ...).
    App(AppError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::LoginRedirect(target) => {
                let location = format!("/login?next={}", urlencoding::encode(&target));
                Redirect::to(&location).into_response()
            }
            AuthRejection::App(err) => err.into_response(),
        }
    }
}

impl From<AppError> for AuthRejection {
    fn from(err: AppError) -> Self {
        AuthRejection::App(err)
    }
}

/// Resolve the session cookie in `parts` to a user, if any.
///
/// Returns `Ok(None)` for a missing cookie, an unknown/expired/revoked
/// session, or a session whose user row has been deleted.
async fn resolve_session(
    parts: &mut Parts,
    state: &AppState,
) -> Result<Option<AuthUser>, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(None);
    };

    let token_hash = hash_session_token(cookie.value());
    let Some(session) = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash).await?
    else {
        return Ok(None);
    };

    let Some(user) = UserRepo::find_by_id(&state.pool, session.user_id).await? else {
        return Ok(None);
    };

    Ok(Some(AuthUser {
        user_id: user.id,
        username: user.username,
        is_admin: user.is_admin,
    }))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match resolve_session(parts, state).await? {
            Some(user) => Ok(user),
            None => {
                let target = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str().to_string())
                    .unwrap_or_else(|| "/".to_string());
                Err(AuthRejection::LoginRedirect(target))
            }
        }
    }
}

impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(resolve_session(parts, state).await?)
    }
}

/// Requires the admin flag. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn operators_only(RequireAdmin(user): RequireAdmin) -> AppResult<Html<String>> {
///     // user is guaranteed to be an admin here
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AuthRejection::App(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            ))));
        }
        Ok(RequireAdmin(user))
    }
}
