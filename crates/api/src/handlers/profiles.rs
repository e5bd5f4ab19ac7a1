//! Handlers for profiles: the caller's own (`/me`) and public ones
//! (`/profiles/{username}`).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::error::CoreError;
use switchdeck_db::models::profile::{ProfileDetail, ProfileView, UpdateProfilePlace};
use switchdeck_db::repositories::{ListingRepo, PlaceRepo, ProfileRepo, UserRepo};
use switchdeck_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{CurrentProfile, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
///
/// The caller's profile with all four lists, inactive listings included.
pub async fn get_me(
    current: CurrentProfile,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ProfileDetail>>> {
    let view = ProfileRepo::find_view_by_user_id(&state.pool, current.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: current.profile_id,
        }))?;

    let detail = profile_detail(&state.pool, view, true).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/me/place
pub async fn update_my_place(
    current: CurrentProfile,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfilePlace>,
) -> AppResult<Json<DataResponse<ProfileView>>> {
    if PlaceRepo::find_by_id(&state.pool, input.place_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id: input.place_id,
        }));
    }

    ProfileRepo::update_place(&state.pool, current.profile_id, input.place_id).await?;
    let view = ProfileRepo::find_view_by_user_id(&state.pool, current.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: current.profile_id,
        }))?;

    tracing::info!(
        profile_id = current.profile_id,
        place_id = input.place_id,
        "Profile moved to another place"
    );

    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/me
///
/// Delete the caller's account. Listings, comments and trade edges go with it.
pub async fn delete_me(
    current: CurrentProfile,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    UserRepo::delete(&state.pool, current.user_id).await?;

    tracing::info!(
        user_id = current.user_id,
        profile_id = current.profile_id,
        "Account deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/profiles/{username}
///
/// Public profile page. Inactive listings are only shown to the owner.
pub async fn get_profile(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<ProfileDetail>>> {
    let view = ProfileRepo::find_view_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile '{username}' not found")))?;

    let is_owner = viewer.is_some_and(|v| v.user_id == view.user_id);
    let detail = profile_detail(&state.pool, view, is_owner).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn profile_detail(
    pool: &DbPool,
    profile: ProfileView,
    with_inactive: bool,
) -> AppResult<ProfileDetail> {
    let id = profile.id;
    Ok(ProfileDetail {
        keep_list: ListingRepo::profile_list(pool, id, Disposition::Keep, with_inactive).await?,
        wish_list: ListingRepo::profile_list(pool, id, Disposition::Wish, with_inactive).await?,
        sell_list: ListingRepo::profile_list(pool, id, Disposition::Sell, with_inactive).await?,
        buy_list: ListingRepo::profile_list(pool, id, Disposition::Buy, with_inactive).await?,
        profile,
    })
}
