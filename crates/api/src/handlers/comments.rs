//! Handlers for listing comments.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use switchdeck_core::comments::validate_comment_text;
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MAX_PER_PAGE;
use switchdeck_core::search::{clamp_limit, page_offset};
use switchdeck_core::types::DbId;
use switchdeck_db::models::comment::{CommentPage, CreateComment, CreatedComment};
use switchdeck_db::repositories::{CommentRepo, ListingRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentProfile;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PermalinkResponse {
    pub permalink: String,
}

/// GET /api/v1/lots/{id}/comments?page=&objects-per-page=
///
/// Oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<CommentPage>>> {
    if ListingRepo::find_by_id(&state.pool, listing_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }));
    }

    let per_page = clamp_limit(
        params.per_page,
        state.config.market.comments_per_page,
        MAX_PER_PAGE,
    );
    let page = params.page.unwrap_or(1).max(1);

    let comments = CommentRepo::list_for_listing(
        &state.pool,
        listing_id,
        per_page,
        page_offset(Some(page), per_page),
    )
    .await?;
    let total = CommentRepo::count_for_listing(&state.pool, listing_id).await?;

    Ok(Json(DataResponse {
        data: CommentPage {
            comments,
            total,
            page,
            per_page,
        },
    }))
}

/// POST /api/v1/lots/{id}/comments?objects-per-page=
///
/// Adds the comment and bumps the listing. The returned permalink uses the
/// page size the caller is browsing with.
pub async fn add_comment(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(listing_id): Path<DbId>,
    Query(params): Query<PageParams>,
    Json(input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedComment>>)> {
    input.validate()?;
    validate_comment_text(&input.text)?;

    let comment =
        CommentRepo::create(&state.pool, listing_id, current.profile_id, input.text.trim())
            .await?;
    let permalink = CommentRepo::permalink(
        &state.pool,
        &comment,
        requested_per_page(&params),
        state.config.market.comments_per_page,
    )
    .await?;

    tracing::info!(
        comment_id = comment.id,
        listing_id,
        profile_id = current.profile_id,
        "Comment added"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedComment { comment, permalink },
        }),
    ))
}

/// DELETE /api/v1/comments/{id}
///
/// Only the author may delete a comment.
pub async fn delete_comment(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    CommentRepo::delete_by_author(&state.pool, id, current.profile_id).await?;

    tracing::info!(comment_id = id, profile_id = current.profile_id, "Comment deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/comments/{id}/permalink?objects-per-page=
pub async fn get_permalink(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<PermalinkResponse>>> {
    let comment = CommentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id,
        }))?;

    let permalink = CommentRepo::permalink(
        &state.pool,
        &comment,
        requested_per_page(&params),
        state.config.market.comments_per_page,
    )
    .await?;

    Ok(Json(DataResponse {
        data: PermalinkResponse { permalink },
    }))
}

fn requested_per_page(params: &PageParams) -> Option<i64> {
    params.per_page.map(|n| n.clamp(1, MAX_PER_PAGE))
}
