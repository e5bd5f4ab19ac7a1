//! External shop catalogs tracked for game prices.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};
use validator::Validate;

pub const MAX_CATALOG_SLUG_LEN: usize = 30;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `catalogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Catalog {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub url: String,
    pub price_selector: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `catalog_links` table: one game's page in one catalog.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogLink {
    pub id: DbId,
    pub game_id: DbId,
    pub catalog_id: DbId,
    pub url: String,
    pub active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A link joined with the selector of its catalog, ready to be parsed.
#[derive(Debug, Clone, FromRow)]
pub struct ParseTarget {
    pub link_id: DbId,
    pub url: String,
    pub price_selector: String,
}

/// A row from the `parse_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ParseResult {
    pub id: DbId,
    pub link_id: DbId,
    pub parsed_at: Timestamp,
    pub page_digest: Option<String>,
    pub price: Option<Decimal>,
    pub exception: Option<String>,
    pub successful: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Tally of a batch parse run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub parsed: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCatalog {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    #[validate(length(min = 1, max = 30))]
    pub slug: Option<String>,
    #[validate(url)]
    pub url: String,
    #[validate(length(min = 1, max = 100))]
    pub price_selector: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCatalog {
    #[validate(length(min = 1, max = 30))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub slug: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub price_selector: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCatalogLink {
    pub game_id: DbId,
    pub catalog_id: DbId,
    #[validate(url)]
    pub url: String,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCatalogLink {
    #[validate(url)]
    pub url: Option<String>,
    pub active: Option<bool>,
}
