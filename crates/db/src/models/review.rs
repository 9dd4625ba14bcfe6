//! Review entity model and DTOs.

use cinelog_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A review row from the `reviews` table.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub movie_title: String,
    pub rank: i32,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review row joined with its author's username, for listing pages.
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthor {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub movie_title: String,
    pub rank: i32,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: String,
}

/// DTO for creating a new review.
///
/// `user_id` is always taken from the authenticated session, never from
/// client input.
#[derive(Debug)]
pub struct CreateReview {
    pub user_id: DbId,
    pub title: String,
    pub movie_title: String,
    pub rank: i32,
    pub content: String,
}
