//! Repositories for `catalogs`, `catalog_links` and `parse_results`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use switchdeck_core::types::DbId;

use crate::models::catalog::{
    Catalog, CatalogLink, CreateCatalog, CreateCatalogLink, ParseResult, ParseTarget,
    UpdateCatalog, UpdateCatalogLink,
};

const CATALOG_COLUMNS: &str = "id, name, slug, url, price_selector, created_at, updated_at";
const LINK_COLUMNS: &str = "id, game_id, catalog_id, url, active, created_at, updated_at";
const RESULT_COLUMNS: &str = "id, link_id, parsed_at, page_digest, price, exception, successful, \
                              created_at, updated_at";

// ---------------------------------------------------------------------------
// Catalogs
// ---------------------------------------------------------------------------

pub struct CatalogRepo;

impl CatalogRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCatalog,
        slug: &str,
    ) -> Result<Catalog, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalogs (name, slug, url, price_selector)
             VALUES ($1, $2, $3, $4)
             RETURNING {CATALOG_COLUMNS}"
        );
        sqlx::query_as::<_, Catalog>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.url)
            .bind(&input.price_selector)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Catalog>, sqlx::Error> {
        let query = format!("SELECT {CATALOG_COLUMNS} FROM catalogs WHERE id = $1");
        sqlx::query_as::<_, Catalog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Catalog>, sqlx::Error> {
        let query = format!("SELECT {CATALOG_COLUMNS} FROM catalogs ORDER BY name ASC");
        sqlx::query_as::<_, Catalog>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCatalog,
    ) -> Result<Option<Catalog>, sqlx::Error> {
        let query = format!(
            "UPDATE catalogs SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                url = COALESCE($4, url),
                price_selector = COALESCE($5, price_selector)
             WHERE id = $1
             RETURNING {CATALOG_COLUMNS}"
        );
        sqlx::query_as::<_, Catalog>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.url)
            .bind(&input.price_selector)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Catalog links
// ---------------------------------------------------------------------------

pub struct CatalogLinkRepo;

impl CatalogLinkRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateCatalogLink,
    ) -> Result<CatalogLink, sqlx::Error> {
        let query = format!(
            "INSERT INTO catalog_links (game_id, catalog_id, url, active)
             VALUES ($1, $2, $3, COALESCE($4, TRUE))
             RETURNING {LINK_COLUMNS}"
        );
        sqlx::query_as::<_, CatalogLink>(&query)
            .bind(input.game_id)
            .bind(input.catalog_id)
            .bind(&input.url)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CatalogLink>, sqlx::Error> {
        let query = format!("SELECT {LINK_COLUMNS} FROM catalog_links WHERE id = $1");
        sqlx::query_as::<_, CatalogLink>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_game(
        pool: &PgPool,
        game_id: DbId,
    ) -> Result<Vec<CatalogLink>, sqlx::Error> {
        let query = format!(
            "SELECT {LINK_COLUMNS} FROM catalog_links WHERE game_id = $1 ORDER BY catalog_id"
        );
        sqlx::query_as::<_, CatalogLink>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCatalogLink,
    ) -> Result<Option<CatalogLink>, sqlx::Error> {
        let query = format!(
            "UPDATE catalog_links SET
                url = COALESCE($2, url),
                active = COALESCE($3, active)
             WHERE id = $1
             RETURNING {LINK_COLUMNS}"
        );
        sqlx::query_as::<_, CatalogLink>(&query)
            .bind(id)
            .bind(&input.url)
            .bind(input.active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM catalog_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A single link with its catalog's selector.
    pub async fn parse_target(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParseTarget>, sqlx::Error> {
        sqlx::query_as::<_, ParseTarget>(
            "SELECT cl.id AS link_id, cl.url, c.price_selector
             FROM catalog_links cl
             JOIN catalogs c ON c.id = cl.catalog_id
             WHERE cl.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Every link with its catalog's selector, optionally only active ones.
    pub async fn parse_targets(
        pool: &PgPool,
        active_only: bool,
    ) -> Result<Vec<ParseTarget>, sqlx::Error> {
        sqlx::query_as::<_, ParseTarget>(
            "SELECT cl.id AS link_id, cl.url, c.price_selector
             FROM catalog_links cl
             JOIN catalogs c ON c.id = cl.catalog_id
             WHERE cl.active OR NOT $1
             ORDER BY cl.id",
        )
        .bind(active_only)
        .fetch_all(pool)
        .await
    }
}

// ---------------------------------------------------------------------------
// Parse results
// ---------------------------------------------------------------------------

pub struct ParseResultRepo;

impl ParseResultRepo {
    /// Record a successful parse.
    pub async fn record_success(
        pool: &PgPool,
        link_id: DbId,
        page_digest: &str,
        price: Decimal,
    ) -> Result<ParseResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO parse_results (link_id, page_digest, price, successful)
             VALUES ($1, $2, $3, TRUE)
             RETURNING {RESULT_COLUMNS}"
        );
        sqlx::query_as::<_, ParseResult>(&query)
            .bind(link_id)
            .bind(page_digest)
            .bind(price)
            .fetch_one(pool)
            .await
    }

    /// Record a failed parse. `page_digest` is absent when the page could
    /// not be fetched at all.
    pub async fn record_failure(
        pool: &PgPool,
        link_id: DbId,
        page_digest: Option<&str>,
        exception: &str,
    ) -> Result<ParseResult, sqlx::Error> {
        let query = format!(
            "INSERT INTO parse_results (link_id, page_digest, exception, successful)
             VALUES ($1, $2, $3, FALSE)
             RETURNING {RESULT_COLUMNS}"
        );
        sqlx::query_as::<_, ParseResult>(&query)
            .bind(link_id)
            .bind(page_digest)
            .bind(exception)
            .fetch_one(pool)
            .await
    }

    /// Parse history of a link, newest first.
    pub async fn list_for_link(
        pool: &PgPool,
        link_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ParseResult>, sqlx::Error> {
        let query = format!(
            "SELECT {RESULT_COLUMNS} FROM parse_results
             WHERE link_id = $1
             ORDER BY parsed_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ParseResult>(&query)
            .bind(link_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
