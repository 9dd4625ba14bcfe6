//! Route definitions.

pub mod admin;
pub mod auth;
pub mod community;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (everything except `/health`).
///
/// ```text
/// GET|POST /signup                  signup form / create account
/// GET|POST /login                   login form / authenticate (?next=)
/// POST     /logout                  end session
///
/// GET      /                        review index (most recent first)
/// GET|POST /review/create           review form / create (requires auth)
/// GET      /review/{id}             review detail with comments
/// POST     /review/{id}/comment     add comment (requires auth)
///
/// GET      /admin/reviews           operator table (admin only)
/// GET      /admin/comments          operator table (admin only)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(community::router())
        .merge(admin::router())
}
