//! Route definitions for catalog price tracking.
//!
//! Two routers are provided:
//! - `catalogs_router()` mounted at `/catalogs`
//! - `links_router()` mounted at `/catalog-links`

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalogs`.
///
/// ```text
/// GET    /       -> list_catalogs
/// POST   /       -> create_catalog (admin only)
/// PUT    /{id}   -> update_catalog (admin only)
/// DELETE /{id}   -> delete_catalog (admin only)
/// ```
pub fn catalogs_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_catalogs).post(catalog::create_catalog),
        )
        .route(
            "/{id}",
            put(catalog::update_catalog).delete(catalog::delete_catalog),
        )
}

/// Catalog link routes mounted at `/catalog-links`.
///
/// ```text
/// GET    /?game_id=      -> list_links
/// POST   /               -> create_link (admin only)
/// PUT    /{id}           -> update_link (admin only)
/// DELETE /{id}           -> delete_link (admin only)
/// GET    /{id}/results   -> list_results
/// POST   /{id}/parse     -> parse_link (admin only)
/// ```
pub fn links_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_links).post(catalog::create_link))
        .route(
            "/{id}",
            put(catalog::update_link).delete(catalog::delete_link),
        )
        .route("/{id}/results", get(catalog::list_results))
        .route("/{id}/parse", post(catalog::parse_link))
}
