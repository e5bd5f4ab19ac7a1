//! Comments on listings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub listing_id: DbId,
    pub author_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Comment joined with its author's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommentView {
    pub id: DbId,
    pub listing_id: DbId,
    pub author_id: DbId,
    pub author_username: String,
    pub text: String,
    pub created_at: Timestamp,
}

/// One page of a listing's comments, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct CommentPage {
    pub comments: Vec<CommentView>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// A freshly created comment with its permalink.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub permalink: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateComment {
    #[validate(length(min = 1, max = 300))]
    pub text: String,
}
