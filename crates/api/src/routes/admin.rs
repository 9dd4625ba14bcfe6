//! Route definitions for the operator pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (admin only).
///
/// ```text
/// GET /admin/reviews   -> list_reviews
/// GET /admin/comments  -> list_comments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/reviews", get(admin::list_reviews))
        .route("/admin/comments", get(admin::list_comments))
}
