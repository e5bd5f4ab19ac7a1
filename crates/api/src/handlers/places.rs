//! Handlers for the `/places` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::error::CoreError;
use switchdeck_core::slug::{resolve_slug, validate_slug};
use switchdeck_core::types::DbId;
use switchdeck_db::models::place::{
    CreatePlace, Place, PlaceDetail, UpdatePlace, MAX_PLACE_SLUG_LEN,
};
use switchdeck_db::repositories::{ListingRepo, PlaceRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/places
///
/// Most popular first, then by name.
pub async fn list_places(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Place>>>> {
    let places = PlaceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/places/{slug}
///
/// The place with the active sell and buy offers of profiles registered there.
pub async fn get_place(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<PlaceDetail>>> {
    let place = PlaceRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Place '{slug}' not found")))?;

    let sell_list = ListingRepo::active_in_place(&state.pool, place.id, Disposition::Sell).await?;
    let buy_list = ListingRepo::active_in_place(&state.pool, place.id, Disposition::Buy).await?;

    Ok(Json(DataResponse {
        data: PlaceDetail {
            place,
            sell_list,
            buy_list,
        },
    }))
}

/// POST /api/v1/places
pub async fn create_place(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePlace>,
) -> AppResult<(StatusCode, Json<DataResponse<Place>>)> {
    input.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name, MAX_PLACE_SLUG_LEN)?;
    let place = PlaceRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        place_id = place.id,
        slug = %place.slug,
        user_id = admin.user_id,
        "Place created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: place })))
}

/// PUT /api/v1/places/id/{id}
pub async fn update_place(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePlace>,
) -> AppResult<Json<DataResponse<Place>>> {
    input.validate()?;
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug, MAX_PLACE_SLUG_LEN)?;
    }

    let place = PlaceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id,
        }))?;

    tracing::info!(place_id = id, user_id = admin.user_id, "Place updated");

    Ok(Json(DataResponse { data: place }))
}

/// DELETE /api/v1/places/id/{id}
///
/// Profiles registered at the place move to the default place first.
pub async fn delete_place(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted =
        PlaceRepo::delete_reassigning(&state.pool, id, state.config.market.default_place_id)
            .await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id,
        }));
    }

    tracing::info!(place_id = id, user_id = admin.user_id, "Place deleted");

    Ok(StatusCode::NO_CONTENT)
}
