//! Repository for the `reviews` table.

use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, ReviewWithAuthor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, movie_title, rank, content, created_at, updated_at";

/// Qualified column list for queries joining the author.
const JOINED_COLUMNS: &str = "r.id, r.user_id, r.title, r.movie_title, r.rank, r.content, \
                               r.created_at, r.updated_at, u.username AS author";

/// Provides CRUD operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, title, movie_title, rank, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.movie_title)
            .bind(input.rank)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// Find a review by ID with its author's username.
    pub async fn find_with_author(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReviewWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reviews with authors, most recent first (descending id).
    pub async fn list_recent_first(pool: &PgPool) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM reviews r
             JOIN users u ON u.id = r.user_id
             ORDER BY r.id DESC"
        );
        sqlx::query_as::<_, ReviewWithAuthor>(&query)
            .fetch_all(pool)
            .await
    }

    /// List all reviews, ascending id. Used by the operator admin table.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews ORDER BY id");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }

    /// Count all reviews. Used by tests to assert create side effects.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(pool)
            .await
    }
}
