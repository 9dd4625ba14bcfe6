//! Comment entity model and DTOs.

use cinelog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A comment row from the `comments` table. Belongs to exactly one review.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: DbId,
    pub user_id: DbId,
    pub review_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A comment row joined with its author's username, for the detail page.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: DbId,
    pub user_id: DbId,
    pub review_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: String,
}

/// DTO for creating a new comment.
///
/// `user_id` and `review_id` are resolved server-side.
#[derive(Debug)]
pub struct CreateComment {
    pub user_id: DbId,
    pub review_id: DbId,
    pub content: String,
}
