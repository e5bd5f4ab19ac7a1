//! Shared query parameter types for API handlers.

use serde::Deserialize;
use switchdeck_core::types::DbId;

/// Offset pagination (`?limit=&offset=`). Values are clamped with
/// `clamp_limit` / `clamp_offset` before reaching the repositories.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Page-number pagination (`?page=&objects-per-page=`), as used by listing
/// and comment pages and by comment permalinks.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    #[serde(rename = "objects-per-page")]
    pub per_page: Option<i64>,
}

/// Query parameters for `GET /lots/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub game: Option<String>,
    pub place: Option<String>,
    pub proposition: Option<String>,
}

/// Query parameters for `GET /catalog-links`.
#[derive(Debug, Deserialize)]
pub struct GameFilterParams {
    pub game_id: DbId,
}
