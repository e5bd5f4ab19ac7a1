//! Listings ("lots"): a profile's declared relationship to a game.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::types::{DbId, Timestamp};
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub profile_id: DbId,
    pub game_id: DbId,
    #[sqlx(try_from = "String")]
    pub disposition: Disposition,
    pub active: bool,
    pub description: String,
    pub price: Decimal,
    pub public_date: Timestamp,
    pub up_time: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing joined with its owner, the owner's place and the game.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingSummary {
    pub id: DbId,
    pub profile_id: DbId,
    pub username: String,
    pub place_id: DbId,
    pub place_name: String,
    pub game_id: DbId,
    pub game_name: String,
    pub game_slug: String,
    #[sqlx(try_from = "String")]
    pub disposition: Disposition,
    pub active: bool,
    pub description: String,
    pub price: Decimal,
    pub public_date: Timestamp,
    pub up_time: Timestamp,
}

/// Listing page payload.
#[derive(Debug, Clone, Serialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: ListingSummary,
    /// Offer-side listings this (want-side) listing would trade into.
    pub change_to: Vec<DbId>,
    /// Want-side listings that name this (offer-side) listing.
    pub ready_change_to: Vec<DbId>,
    pub comment_count: i64,
    pub ready_to_sell: bool,
    pub ready_to_buy: bool,
}

/// Listings the owner may pick when editing the change-to set.
#[derive(Debug, Clone, Serialize)]
pub struct TradeChoices {
    pub choices: Vec<ListingSummary>,
    pub selected: Vec<DbId>,
}

/// Search result. Unknown game or place names are echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub listings: Vec<ListingSummary>,
    pub no_game: Option<String>,
    pub no_place: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for adding a game to the caller's profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateListing {
    pub game_id: DbId,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub disposition: Option<Disposition>,
    pub price: Option<Decimal>,
}

/// DTO for a disposition change. `sell` and `buy` require the terms.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetDisposition {
    pub disposition: Disposition,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangeDescription {
    #[validate(length(max = 1000))]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePrice {
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetActive {
    pub active: bool,
}

/// Full replacement of a listing's trade targets.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceTradeTargets {
    pub listing_ids: Vec<DbId>,
}
