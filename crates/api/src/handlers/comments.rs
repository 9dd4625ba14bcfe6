//! Handler for adding a comment to a review.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;
use cinelog_db::models::comment::CreateComment;
use cinelog_db::repositories::{CommentRepo, ReviewRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::forms::{field_errors, CommentForm};
use crate::middleware::auth::AuthUser;
use crate::pages;
use crate::state::AppState;

/// POST /review/{id}/comment
///
/// Persists a comment linked to the review and the caller, then redirects
/// back to the detail page. Anonymous posts are redirected to the index
/// without persisting anything; invalid content re-renders the detail page
/// with the comment form errors inline.
pub async fn create(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
    Form(form): Form<CommentForm>,
) -> AppResult<Response> {
    let Some(user) = user else {
        return Ok(Redirect::to("/").into_response());
    };

    let review = ReviewRepo::find_with_author(&state.pool, review_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        }))?;

    if let Err(errors) = form.validate() {
        let comments = CommentRepo::list_for_review(&state.pool, review_id).await?;
        return Ok(pages::detail_page(
            Some(&user.username),
            &review,
            &comments,
            &form.content,
            &field_errors(&errors),
        )
        .into_response());
    }

    let input = CreateComment {
        user_id: user.user_id,
        review_id,
        content: form.content.clone(),
    };
    let comment = CommentRepo::create(&state.pool, &input).await?;

    tracing::info!(
        comment_id = comment.id,
        review_id,
        user_id = user.user_id,
        "Comment created"
    );

    Ok(Redirect::to(&format!("/review/{review_id}")).into_response())
}
