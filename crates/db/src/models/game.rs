//! Game catalog entries.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::listing::ListingSummary;

pub const MAX_GAME_SLUG_LEN: usize = 30;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    /// Storage path of the cover image, if uploaded.
    pub cover: Option<String>,
    pub description: String,
    pub eshop_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A game with the number of live sell listings, as used by the ranking.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RankedGame {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub cover: Option<String>,
    pub sell_count: i64,
}

/// Game page: the first page of live offers on both sides.
#[derive(Debug, Clone, Serialize)]
pub struct GameDetail {
    #[serde(flatten)]
    pub game: Game,
    pub sell_list: Vec<ListingSummary>,
    pub sell_count: i64,
    pub buy_list: Vec<ListingSummary>,
    pub buy_count: i64,
}

/// DTO for creating a game.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGame {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(length(min = 1, max = 30))]
    pub slug: Option<String>,
    pub cover: Option<String>,
    #[serde(default)]
    pub description: String,
    #[validate(url)]
    pub eshop_url: Option<String>,
}

/// DTO for updating a game. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateGame {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub slug: Option<String>,
    pub cover: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub eshop_url: Option<String>,
}
