//! Handlers for the operator pages.
//!
//! Read-only tables over the raw review and comment rows, guarded by
//! [`RequireAdmin`].

use axum::extract::State;
use axum::response::Html;
use cinelog_db::repositories::{CommentRepo, ReviewRepo};

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::pages;
use crate::state::AppState;

/// GET /admin/reviews
pub async fn list_reviews(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let reviews = ReviewRepo::list_all(&state.pool).await?;
    Ok(pages::admin_reviews_page(&admin.username, &reviews))
}

/// GET /admin/comments
pub async fn list_comments(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let comments = CommentRepo::list_all(&state.pool).await?;
    Ok(pages::admin_comments_page(&admin.username, &comments))
}
