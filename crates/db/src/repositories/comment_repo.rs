//! Repository for the `comments` table.

use sqlx::PgPool;
use switchdeck_core::comments::comment_permalink;
use switchdeck_core::error::CoreError;
use switchdeck_core::types::DbId;

use crate::error::DbError;
use crate::models::comment::{Comment, CommentView};

const COLUMNS: &str = "id, listing_id, author_id, text, created_at, updated_at";

const VIEW_SELECT: &str = "SELECT c.id, c.listing_id, c.author_id, u.username AS author_username, \
                           c.text, c.created_at \
                           FROM comments c \
                           JOIN profiles p ON p.id = c.author_id \
                           JOIN users u ON u.id = p.user_id";

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment and bump the listing's `up_time` in one transaction.
    pub async fn create(
        pool: &PgPool,
        listing_id: DbId,
        author_id: DbId,
        text: &str,
    ) -> Result<Comment, DbError> {
        let mut tx = pool.begin().await?;

        let touched = sqlx::query(
            "UPDATE listings SET up_time = GREATEST(up_time, NOW()) WHERE id = $1",
        )
        .bind(listing_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        if touched == 0 {
            return Err(CoreError::NotFound {
                entity: "Listing",
                id: listing_id,
            }
            .into());
        }

        let query = format!(
            "INSERT INTO comments (listing_id, author_id, text)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(listing_id)
            .bind(author_id)
            .bind(text)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a listing's comments, oldest first.
    pub async fn list_for_listing(
        pool: &PgPool,
        listing_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>, sqlx::Error> {
        let query = format!(
            "{VIEW_SELECT}
             WHERE c.listing_id = $1
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CommentView>(&query)
            .bind(listing_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_for_listing(pool: &PgPool, listing_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE listing_id = $1")
            .bind(listing_id)
            .fetch_one(pool)
            .await
    }

    /// Zero-based position of a comment among its listing's comments.
    pub async fn position(pool: &PgPool, comment: &Comment) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments
             WHERE listing_id = $1 AND (created_at, id) < ($2, $3)",
        )
        .bind(comment.listing_id)
        .bind(comment.created_at)
        .bind(comment.id)
        .fetch_one(pool)
        .await
    }

    /// Permalink of a comment for the given page size.
    pub async fn permalink(
        pool: &PgPool,
        comment: &Comment,
        requested_per_page: Option<i64>,
        default_per_page: i64,
    ) -> Result<String, sqlx::Error> {
        let position = Self::position(pool, comment).await?;
        Ok(comment_permalink(
            comment.listing_id,
            comment.id,
            position,
            requested_per_page,
            default_per_page,
        ))
    }

    /// Delete a comment. Only its author may do so.
    pub async fn delete_by_author(
        pool: &PgPool,
        id: DbId,
        actor_profile_id: DbId,
    ) -> Result<(), DbError> {
        let comment = Self::find_by_id(pool, id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Comment",
                id,
            })?;
        if comment.author_id != actor_profile_id {
            return Err(CoreError::Forbidden("Only the author may delete this comment".into()).into());
        }
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
