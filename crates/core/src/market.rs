//! Marketplace-wide policy settings.
//!
//! Loaded once at startup and handed to the repository and handler layers
//! through application state.

/// Default number of comments shown per listing page.
pub const DEFAULT_COMMENTS_PER_PAGE: i64 = 10;

/// Default number of listings shown per game list page.
pub const DEFAULT_LOTS_PER_PAGE: i64 = 15;

/// Place assigned to new profiles and to profiles whose place is deleted.
pub const DEFAULT_PLACE_ID: i64 = 1;

/// Upper bound for any caller-supplied page size.
pub const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub comments_per_page: i64,
    pub lots_per_page: i64,
    pub default_place_id: i64,
    /// Delete a listing's comments when it leaves `sell`/`buy`.
    pub purge_comments_on_withdraw: bool,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            comments_per_page: DEFAULT_COMMENTS_PER_PAGE,
            lots_per_page: DEFAULT_LOTS_PER_PAGE,
            default_place_id: DEFAULT_PLACE_ID,
            purge_comments_on_withdraw: true,
        }
    }
}
