//! Handlers for direct-message dialogs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MAX_PER_PAGE;
use switchdeck_core::search::{clamp_limit, clamp_offset};
use switchdeck_db::models::dialog::{CreateMessage, Dialog, DialogSummary, Message, OpenDialog};
use switchdeck_db::repositories::{DialogRepo, UserRepo};
use switchdeck_db::DbPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of messages returned per request.
const DEFAULT_MESSAGES_LIMIT: i64 = 50;

/// GET /api/v1/dialogs
pub async fn list_dialogs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<DialogSummary>>>> {
    let dialogs = DialogRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: dialogs }))
}

/// POST /api/v1/dialogs
///
/// Open (or reopen) the dialog with another user.
pub async fn open_dialog(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OpenDialog>,
) -> AppResult<Json<DataResponse<Dialog>>> {
    input.validate()?;
    let other = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", input.username)))?;

    if other.id == auth.user_id {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot open a dialog with yourself".into(),
        )));
    }

    let dialog = DialogRepo::get_or_create(&state.pool, auth.user_id, other.id).await?;

    tracing::info!(
        dialog_id = %dialog.id,
        user_id = auth.user_id,
        other_user_id = other.id,
        "Dialog opened"
    );

    Ok(Json(DataResponse { data: dialog }))
}

/// GET /api/v1/dialogs/{id}/messages
///
/// Newest first. Only participants may read.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Message>>>> {
    find_for_participant(&state.pool, id, &auth).await?;

    let limit = clamp_limit(params.limit, DEFAULT_MESSAGES_LIMIT, MAX_PER_PAGE);
    let offset = clamp_offset(params.offset);
    let messages = DialogRepo::list_messages(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/dialogs/{id}/messages
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<Message>>)> {
    input.validate()?;
    find_for_participant(&state.pool, id, &auth).await?;

    let message = DialogRepo::create_message(&state.pool, id, auth.user_id, &input.text).await?;

    tracing::info!(
        dialog_id = %id,
        message_id = %message.id,
        user_id = auth.user_id,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

async fn find_for_participant(pool: &DbPool, id: Uuid, auth: &AuthUser) -> AppResult<Dialog> {
    let dialog = DialogRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Dialog {id} not found")))?;

    if !dialog.has_participant(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only participants may access this dialog".into(),
        )));
    }
    Ok(dialog)
}
