//! Route definitions for the `/dialogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::dialogs;
use crate::state::AppState;

/// Routes mounted at `/dialogs` (auth required).
///
/// ```text
/// GET  /                 -> list_dialogs
/// POST /                 -> open_dialog
/// GET  /{id}/messages    -> list_messages (participants only)
/// POST /{id}/messages    -> send_message (participants only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dialogs::list_dialogs).post(dialogs::open_dialog))
        .route(
            "/{id}/messages",
            get(dialogs::list_messages).post(dialogs::send_message),
        )
}
