//! Places (cities/regions) profiles are registered in.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};
use validator::Validate;

use crate::models::listing::ListingSummary;

/// Maximum length of a generated place slug.
pub const MAX_PLACE_SLUG_LEN: usize = 20;

/// A row from the `places` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub popularity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Place page: live sell and buy listings of profiles registered there.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceDetail {
    #[serde(flatten)]
    pub place: Place,
    pub sell_list: Vec<ListingSummary>,
    pub buy_list: Vec<ListingSummary>,
}

/// DTO for creating a place. The slug is derived from the name when omitted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlace {
    #[validate(length(min = 1, max = 20))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub slug: Option<String>,
    #[serde(default)]
    pub popularity: i32,
}

/// DTO for updating a place. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePlace {
    #[validate(length(min = 1, max = 20))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub slug: Option<String>,
    pub popularity: Option<i32>,
}
