//! Handlers for the review listing, creation, and detail pages.

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;
use cinelog_db::models::review::CreateReview;
use cinelog_db::repositories::{CommentRepo, ReviewRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::forms::{field_errors, ReviewForm};
use crate::middleware::auth::AuthUser;
use crate::pages;
use crate::state::AppState;

/// GET /
///
/// All reviews, most recent first (strictly descending id).
pub async fn index(
    user: Option<AuthUser>,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let reviews = ReviewRepo::list_recent_first(&state.pool).await?;
    Ok(pages::index_page(
        user.as_ref().map(|u| u.username.as_str()),
        &reviews,
    ))
}

/// GET /review/create
///
/// Empty review form. Anonymous visitors are redirected to the login page
/// with a `next` parameter by the [`AuthUser`] extractor.
pub async fn create_form(user: AuthUser) -> Html<String> {
    pages::review_form_page(&user.username, &ReviewForm::default(), &[])
}

/// POST /review/create
///
/// Persists a review owned by the caller and redirects to the index.
/// The owner always comes from the session, never from the form body.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<ReviewForm>,
) -> AppResult<Response> {
    if let Err(errors) = form.validate() {
        return Ok(
            pages::review_form_page(&user.username, &form, &field_errors(&errors)).into_response(),
        );
    }

    let rank = form
        .parsed_rank()
        .ok_or_else(|| AppError::InternalError("Validated rank failed to parse".into()))?;

    let input = CreateReview {
        user_id: user.user_id,
        title: form.title.clone(),
        movie_title: form.movie_title.clone(),
        rank,
        content: form.content.clone(),
    };
    let review = ReviewRepo::create(&state.pool, &input).await?;

    tracing::info!(review_id = review.id, user_id = user.user_id, "Review created");

    Ok(Redirect::to("/").into_response())
}

/// GET /review/{id}
///
/// Review detail with its comments (oldest first) and an empty comment form.
/// An unknown id yields the 404 page.
pub async fn detail(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(review_id): Path<DbId>,
) -> AppResult<Html<String>> {
    let review = ReviewRepo::find_with_author(&state.pool, review_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id: review_id,
        }))?;

    let comments = CommentRepo::list_for_review(&state.pool, review_id).await?;

    Ok(pages::detail_page(
        user.as_ref().map(|u| u.username.as_str()),
        &review,
        &comments,
        "",
        &[],
    ))
}
