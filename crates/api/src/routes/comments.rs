//! Route definitions for the `/comments` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
///
/// ```text
/// DELETE /{id}             -> delete_comment (author only)
/// GET    /{id}/permalink   -> get_permalink
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", delete(comments::delete_comment))
        .route("/{id}/permalink", get(comments::get_permalink))
}
