//! Handlers for catalog price tracking: shop catalogs, per-game catalog
//! links and their parse history.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use switchdeck_core::catalog::validate_selector;
use switchdeck_core::error::CoreError;
use switchdeck_core::market::MAX_PER_PAGE;
use switchdeck_core::search::{clamp_limit, clamp_offset};
use switchdeck_core::slug::{resolve_slug, validate_slug};
use switchdeck_core::types::DbId;
use switchdeck_db::models::catalog::{
    Catalog, CatalogLink, CreateCatalog, CreateCatalogLink, ParseResult, UpdateCatalog,
    UpdateCatalogLink, MAX_CATALOG_SLUG_LEN,
};
use switchdeck_db::repositories::{CatalogLinkRepo, CatalogRepo, GameRepo, ParseResultRepo};
use switchdeck_worker::price_tracker;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{GameFilterParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of parse results returned per request.
const DEFAULT_RESULTS_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

/// GET /api/v1/catalogs
pub async fn list_catalogs(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Catalog>>>> {
    let catalogs = CatalogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: catalogs }))
}

/// POST /api/v1/catalogs
pub async fn create_catalog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCatalog>,
) -> AppResult<(StatusCode, Json<DataResponse<Catalog>>)> {
    input.validate()?;
    check_selector(&input.price_selector)?;
    let slug = resolve_slug(input.slug.as_deref(), &input.name, MAX_CATALOG_SLUG_LEN)?;

    let catalog = CatalogRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        catalog_id = catalog.id,
        slug = %catalog.slug,
        user_id = admin.user_id,
        "Catalog created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: catalog })))
}

/// PUT /api/v1/catalogs/{id}
pub async fn update_catalog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCatalog>,
) -> AppResult<Json<DataResponse<Catalog>>> {
    input.validate()?;
    if let Some(selector) = input.price_selector.as_deref() {
        check_selector(selector)?;
    }
    if let Some(slug) = input.slug.as_deref() {
        validate_slug(slug, MAX_CATALOG_SLUG_LEN)?;
    }

    let catalog = CatalogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Catalog",
            id,
        }))?;

    tracing::info!(catalog_id = id, user_id = admin.user_id, "Catalog updated");

    Ok(Json(DataResponse { data: catalog }))
}

/// DELETE /api/v1/catalogs/{id}
///
/// Links into the catalog and their parse history go with it.
pub async fn delete_catalog(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CatalogRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Catalog",
            id,
        }));
    }

    tracing::info!(catalog_id = id, user_id = admin.user_id, "Catalog deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Catalog links
// ---------------------------------------------------------------------------

/// GET /api/v1/catalog-links?game_id=
pub async fn list_links(
    State(state): State<AppState>,
    Query(params): Query<GameFilterParams>,
) -> AppResult<Json<DataResponse<Vec<CatalogLink>>>> {
    let links = CatalogLinkRepo::list_for_game(&state.pool, params.game_id).await?;
    Ok(Json(DataResponse { data: links }))
}

/// POST /api/v1/catalog-links
pub async fn create_link(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCatalogLink>,
) -> AppResult<(StatusCode, Json<DataResponse<CatalogLink>>)> {
    input.validate()?;
    if GameRepo::find_by_id(&state.pool, input.game_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Game",
            id: input.game_id,
        }));
    }
    if CatalogRepo::find_by_id(&state.pool, input.catalog_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Catalog",
            id: input.catalog_id,
        }));
    }

    let link = CatalogLinkRepo::create(&state.pool, &input).await?;

    tracing::info!(
        link_id = link.id,
        game_id = link.game_id,
        catalog_id = link.catalog_id,
        user_id = admin.user_id,
        "Catalog link created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: link })))
}

/// PUT /api/v1/catalog-links/{id}
pub async fn update_link(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCatalogLink>,
) -> AppResult<Json<DataResponse<CatalogLink>>> {
    input.validate()?;
    let link = CatalogLinkRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CatalogLink",
            id,
        }))?;

    tracing::info!(link_id = id, user_id = admin.user_id, "Catalog link updated");

    Ok(Json(DataResponse { data: link }))
}

/// DELETE /api/v1/catalog-links/{id}
pub async fn delete_link(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CatalogLinkRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CatalogLink",
            id,
        }));
    }

    tracing::info!(link_id = id, user_id = admin.user_id, "Catalog link deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// GET /api/v1/catalog-links/{id}/results
///
/// Parse history of a link, newest first.
pub async fn list_results(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ParseResult>>>> {
    if CatalogLinkRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CatalogLink",
            id,
        }));
    }

    let limit = clamp_limit(params.limit, DEFAULT_RESULTS_LIMIT, MAX_PER_PAGE);
    let offset = clamp_offset(params.offset);
    let results = ParseResultRepo::list_for_link(&state.pool, id, limit, offset).await?;
    Ok(Json(DataResponse { data: results }))
}

/// POST /api/v1/catalog-links/{id}/parse
///
/// Fetch and parse the link now. A fetch or extraction failure is not an
/// HTTP error: it is recorded and returned as an unsuccessful result.
pub async fn parse_link(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<ParseResult>>)> {
    let target = CatalogLinkRepo::parse_target(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CatalogLink",
            id,
        }))?;

    let result = price_tracker::parse_link(&state.pool, state.fetcher.as_ref(), &target).await?;

    tracing::info!(
        link_id = id,
        successful = result.successful,
        user_id = admin.user_id,
        "Catalog link parsed on demand"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

fn check_selector(selector: &str) -> AppResult<()> {
    validate_selector(selector).map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}
