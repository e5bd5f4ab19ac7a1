use std::sync::Arc;

use switchdeck_worker::PageFetcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool is reference-counted and everything else is
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: switchdeck_db::DbPool,
    /// Server configuration, including the marketplace policy.
    pub config: Arc<ServerConfig>,
    /// Fetches catalog shop pages for on-demand and periodic price parsing.
    pub fetcher: Arc<dyn PageFetcher>,
}
