//! Route definitions for profiles.
//!
//! Two routers are provided:
//! - `me_router()` for the caller's own profile, mounted at `/me`
//! - `router()` for public profile pages, mounted at `/profiles`

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Own-profile routes mounted at `/me` (auth required).
///
/// ```text
/// GET    /        -> get_me
/// DELETE /        -> delete_me
/// PUT    /place   -> update_my_place
/// ```
pub fn me_router() -> Router<AppState> {
    Router::new()
        .route("/", get(profiles::get_me).delete(profiles::delete_me))
        .route("/place", put(profiles::update_my_place))
}

/// Public profile routes mounted at `/profiles`.
///
/// ```text
/// GET /{username}  -> get_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{username}", get(profiles::get_profile))
}
