//! Marketplace profiles: one per user, pinned to a place.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};

use crate::models::listing::ListingSummary;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub place_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Profile joined with its user name and place.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProfileView {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub place_id: DbId,
    pub place_name: String,
    pub place_slug: String,
    pub created_at: Timestamp,
}

/// Profile page: the profile plus its four listing projections.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub profile: ProfileView,
    pub keep_list: Vec<ListingSummary>,
    pub wish_list: Vec<ListingSummary>,
    pub sell_list: Vec<ListingSummary>,
    pub buy_list: Vec<ListingSummary>,
}

/// DTO for moving a profile to another place.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfilePlace {
    pub place_id: DbId,
}
