//! Handlers for the `/games` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use switchdeck_core::disposition::Disposition;
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MAX_PER_PAGE;
use switchdeck_core::search::{clamp_limit, clamp_offset, page_offset};
use switchdeck_core::slug::{resolve_slug, validate_slug};
use switchdeck_core::types::DbId;
use switchdeck_db::models::game::{
    CreateGame, Game, GameDetail, RankedGame, UpdateGame, MAX_GAME_SLUG_LEN,
};
use switchdeck_db::models::listing::ListingSummary;
use switchdeck_db::repositories::{GameRepo, ListingRepo};
use switchdeck_db::DbPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PageParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default page size for game catalogs.
const DEFAULT_GAMES_LIMIT: i64 = 50;

/// One page of a game's live offers.
#[derive(Debug, Serialize)]
pub struct OfferPage {
    pub listings: Vec<ListingSummary>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

// ---------------------------------------------------------------------------
// Public endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/games
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Game>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_GAMES_LIMIT, MAX_PER_PAGE);
    let offset = clamp_offset(params.offset);
    let games = GameRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/games/ranked
///
/// Games ordered by how many live sell offers they have.
pub async fn ranked_games(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<RankedGame>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_GAMES_LIMIT, MAX_PER_PAGE);
    let offset = clamp_offset(params.offset);
    let games = GameRepo::ranked_by_sell(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/games/{slug}
///
/// The game with the first page of its sell and buy offers.
pub async fn get_game(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<GameDetail>>> {
    let game = find_by_slug(&state.pool, &slug).await?;
    let per_page = state.config.market.lots_per_page;

    let sell_list =
        ListingRepo::live_for_game(&state.pool, game.id, Disposition::Sell, per_page, 0).await?;
    let sell_count =
        ListingRepo::count_live_for_game(&state.pool, game.id, Disposition::Sell).await?;
    let buy_list =
        ListingRepo::live_for_game(&state.pool, game.id, Disposition::Buy, per_page, 0).await?;
    let buy_count =
        ListingRepo::count_live_for_game(&state.pool, game.id, Disposition::Buy).await?;

    Ok(Json(DataResponse {
        data: GameDetail {
            game,
            sell_list,
            sell_count,
            buy_list,
            buy_count,
        },
    }))
}

/// GET /api/v1/games/{slug}/sell
pub async fn game_sell_list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<OfferPage>>> {
    offer_page(&state, &slug, Disposition::Sell, &params).await
}

/// GET /api/v1/games/{slug}/buy
pub async fn game_buy_list(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<DataResponse<OfferPage>>> {
    offer_page(&state, &slug, Disposition::Buy, &params).await
}

// ---------------------------------------------------------------------------
// Admin endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/games
pub async fn create_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<(StatusCode, Json<DataResponse<Game>>)> {
    input.validate()?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name, MAX_GAME_SLUG_LEN)?;
    let game = GameRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        game_id = game.id,
        slug = %game.slug,
        user_id = admin.user_id,
        "Game created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PUT /api/v1/games/id/{id}
pub async fn update_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGame>,
) -> AppResult<Json<DataResponse<Game>>> {
    input.validate()?;
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug, MAX_GAME_SLUG_LEN)?;
    }

    let game = GameRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Game", id }))?;

    tracing::info!(game_id = id, user_id = admin.user_id, "Game updated");

    Ok(Json(DataResponse { data: game }))
}

/// DELETE /api/v1/games/id/{id}
///
/// Every listing of the game is deleted with it.
pub async fn delete_game(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !GameRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Game", id }));
    }

    tracing::info!(game_id = id, user_id = admin.user_id, "Game deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_by_slug(pool: &DbPool, slug: &str) -> AppResult<Game> {
    GameRepo::find_by_slug(pool, slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Game '{slug}' not found")))
}

async fn offer_page(
    state: &AppState,
    slug: &str,
    disposition: Disposition,
    params: &PageParams,
) -> AppResult<Json<DataResponse<OfferPage>>> {
    let game = find_by_slug(&state.pool, slug).await?;
    let per_page = clamp_limit(params.per_page, state.config.market.lots_per_page, MAX_PER_PAGE);
    let page = params.page.unwrap_or(1).max(1);

    let listings = ListingRepo::live_for_game(
        &state.pool,
        game.id,
        disposition,
        per_page,
        page_offset(Some(page), per_page),
    )
    .await?;
    let total = ListingRepo::count_live_for_game(&state.pool, game.id, disposition).await?;

    Ok(Json(DataResponse {
        data: OfferPage {
            listings,
            total,
            page,
            per_page,
        },
    }))
}
