//! Handlers for the `/lots` resource: listings, their disposition state
//! machine and their trade (change-to) sets.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MAX_PER_PAGE;
use switchdeck_core::search::{clamp_limit, clamp_offset, Proposition, SearchCriteria};
use switchdeck_core::types::DbId;
use switchdeck_db::models::listing::{
    ChangeDescription, ChangePrice, CreateListing, Listing, ListingDetail, ListingSummary,
    ReplaceTradeTargets, SearchOutcome, SetActive, SetDisposition, TradeChoices,
};
use switchdeck_db::repositories::ListingRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentProfile;
use crate::query::{PaginationParams, SearchParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/lots
///
/// Active listings, most recently active first.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ListingSummary>>>> {
    let limit = clamp_limit(params.limit, state.config.market.lots_per_page, MAX_PER_PAGE);
    let offset = clamp_offset(params.offset);
    let listings = ListingRepo::list_active(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: listings }))
}

/// GET /api/v1/lots/search?game=&place=&proposition=
pub async fn search_listings(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<SearchOutcome>>> {
    let proposition: Proposition = params.proposition.as_deref().unwrap_or("").parse()?;
    let criteria = SearchCriteria::new(
        params.game.as_deref(),
        params.place.as_deref(),
        proposition,
    );

    let outcome = ListingRepo::search(&state.pool, &criteria).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// GET /api/v1/lots/{id}
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ListingDetail>>> {
    let detail = ListingRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Owner endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/lots
///
/// Add a game to the caller's profile (default disposition `keep`).
pub async fn create_listing(
    current: CurrentProfile,
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<DataResponse<Listing>>)> {
    input.validate()?;
    let listing = ListingRepo::create(&state.pool, current.profile_id, &input).await?;

    tracing::info!(
        listing_id = listing.id,
        profile_id = current.profile_id,
        game_id = listing.game_id,
        disposition = %listing.disposition,
        "Listing created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}

/// DELETE /api/v1/lots/{id}
pub async fn delete_listing(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    ListingRepo::delete(&state.pool, id, current.profile_id).await?;

    tracing::info!(listing_id = id, profile_id = current.profile_id, "Listing deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/lots/{id}/disposition
///
/// Move the listing to another disposition. Publishing (`sell`/`buy`)
/// requires a description and a price in the same request.
pub async fn set_disposition(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetDisposition>,
) -> AppResult<Json<DataResponse<Listing>>> {
    input.validate()?;
    let listing = ListingRepo::set_disposition(
        &state.pool,
        id,
        current.profile_id,
        &input,
        &state.config.market,
    )
    .await?;

    tracing::info!(
        listing_id = id,
        profile_id = current.profile_id,
        disposition = %listing.disposition,
        "Listing disposition changed"
    );

    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/lots/{id}/description
pub async fn change_description(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangeDescription>,
) -> AppResult<Json<DataResponse<Listing>>> {
    input.validate()?;
    let listing =
        ListingRepo::change_description(&state.pool, id, current.profile_id, &input.description)
            .await?;
    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/lots/{id}/price
///
/// Only published (`sell`/`buy`) listings carry a price.
pub async fn change_price(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ChangePrice>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing =
        ListingRepo::change_price(&state.pool, id, current.profile_id, input.price).await?;

    tracing::info!(
        listing_id = id,
        profile_id = current.profile_id,
        price = %listing.price,
        "Listing price changed"
    );

    Ok(Json(DataResponse { data: listing }))
}

/// PUT /api/v1/lots/{id}/active
///
/// Hide or show a listing. Does not bump it.
pub async fn set_active(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetActive>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = ListingRepo::set_active(&state.pool, id, current.profile_id, input.active).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// POST /api/v1/lots/{id}/touch
///
/// Bump the listing to the top of activity-ordered lists.
pub async fn touch_listing(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Listing>>> {
    let listing = ListingRepo::touch(&state.pool, id, current.profile_id).await?;
    Ok(Json(DataResponse { data: listing }))
}

/// GET /api/v1/lots/{id}/change-to
///
/// The caller's listings that may be paired with this one, and the current
/// selection.
pub async fn get_change_to(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<TradeChoices>>> {
    let choices = ListingRepo::trade_choices(&state.pool, id, current.profile_id).await?;
    Ok(Json(DataResponse { data: choices }))
}

/// PUT /api/v1/lots/{id}/change-to
///
/// Replace the whole trade set. An empty list clears it.
pub async fn replace_change_to(
    current: CurrentProfile,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplaceTradeTargets>,
) -> AppResult<Json<DataResponse<Vec<DbId>>>> {
    let stored =
        ListingRepo::replace_trade_targets(&state.pool, id, current.profile_id, &input.listing_ids)
            .await?;

    tracing::info!(
        listing_id = id,
        profile_id = current.profile_id,
        targets = stored.len(),
        "Listing trade set replaced"
    );

    Ok(Json(DataResponse { data: stored }))
}
