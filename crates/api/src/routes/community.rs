//! Route definitions for the review and comment pages.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{comments, reviews};
use crate::state::AppState;

/// Routes mounted at the root.
///
/// ```text
/// GET  /                     -> index
/// GET  /review/create        -> create_form (requires auth)
/// POST /review/create        -> create (requires auth)
/// GET  /review/{id}          -> detail
/// POST /review/{id}/comment  -> comments::create (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::index))
        .route(
            "/review/create",
            get(reviews::create_form).post(reviews::create),
        )
        .route("/review/{id}", get(reviews::detail))
        .route("/review/{id}/comment", post(comments::create))
}
