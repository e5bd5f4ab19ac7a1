//! Route definitions for the `/places` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::places;
use crate::state::AppState;

/// Routes mounted at `/places`.
///
/// ```text
/// GET    /              -> list_places
/// POST   /              -> create_place (admin only)
/// GET    /{slug}        -> get_place
/// PUT    /id/{id}       -> update_place (admin only)
/// DELETE /id/{id}       -> delete_place (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(places::list_places).post(places::create_place))
        .route("/{slug}", get(places::get_place))
        .route(
            "/id/{id}",
            put(places::update_place).delete(places::delete_place),
        )
}
