//! Route definitions for the `/lots` resource, including listing comments.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{comments, listings};
use crate::state::AppState;

/// Routes mounted at `/lots`.
///
/// ```text
/// GET    /                   -> list_listings
/// POST   /                   -> create_listing (auth required)
/// GET    /search             -> search_listings
/// GET    /{id}               -> get_listing
/// DELETE /{id}               -> delete_listing (owner only)
/// POST   /{id}/disposition   -> set_disposition (owner only)
/// PUT    /{id}/description   -> change_description (owner only)
/// PUT    /{id}/price         -> change_price (owner only)
/// PUT    /{id}/active        -> set_active (owner only)
/// POST   /{id}/touch         -> touch_listing (owner only)
/// GET    /{id}/change-to     -> get_change_to (owner only)
/// PUT    /{id}/change-to     -> replace_change_to (owner only)
/// GET    /{id}/comments      -> list_comments
/// POST   /{id}/comments      -> add_comment (auth required)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(listings::list_listings).post(listings::create_listing),
        )
        .route("/search", get(listings::search_listings))
        .route(
            "/{id}",
            get(listings::get_listing).delete(listings::delete_listing),
        )
        .route("/{id}/disposition", post(listings::set_disposition))
        .route("/{id}/description", put(listings::change_description))
        .route("/{id}/price", put(listings::change_price))
        .route("/{id}/active", put(listings::set_active))
        .route("/{id}/touch", post(listings::touch_listing))
        .route(
            "/{id}/change-to",
            get(listings::get_change_to).put(listings::replace_change_to),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
}
