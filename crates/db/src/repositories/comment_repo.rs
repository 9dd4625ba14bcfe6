//! Repository for the `comments` table.

use cinelog_core::types::DbId;
use sqlx::PgPool;

use crate::models::comment::{Comment, CommentWithAuthor, CreateComment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, review_id, content, created_at, updated_at";

/// Qualified column list for queries joining the author.
const JOINED_COLUMNS: &str =
    "c.id, c.user_id, c.review_id, c.content, c.created_at, c.updated_at, u.username AS author";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a new comment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (user_id, review_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.user_id)
            .bind(input.review_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// List the comments of one review with authors, oldest first.
    pub async fn list_for_review(
        pool: &PgPool,
        review_id: DbId,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM comments c
             JOIN users u ON u.id = c.user_id
             WHERE c.review_id = $1
             ORDER BY c.id"
        );
        sqlx::query_as::<_, CommentWithAuthor>(&query)
            .bind(review_id)
            .fetch_all(pool)
            .await
    }

    /// List all comments, ascending id. Used by the operator admin table.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments ORDER BY id");
        sqlx::query_as::<_, Comment>(&query).fetch_all(pool).await
    }

    /// Count all comments. Used by tests to assert create side effects.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(pool)
            .await
    }
}
