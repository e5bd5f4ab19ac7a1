//! Repository for the `games` table.

use sqlx::PgPool;
use switchdeck_core::types::DbId;

use crate::models::game::{CreateGame, Game, RankedGame, UpdateGame};

const COLUMNS: &str = "id, name, slug, cover, description, eshop_url, created_at, updated_at";

pub struct GameRepo;

impl GameRepo {
    /// Insert a game with an already resolved slug.
    pub async fn create(pool: &PgPool, input: &CreateGame, slug: &str) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (name, slug, cover, description, eshop_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.cover)
            .bind(&input.description)
            .bind(&input.eshop_url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE slug = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Exact, case-sensitive name lookup used by search.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE name = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All games ordered by name.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games ORDER BY name ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Game>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Games ranked by the number of live sell listings (active, already
    /// published). Ties are broken by name so the order is stable.
    pub async fn ranked_by_sell(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RankedGame>, sqlx::Error> {
        sqlx::query_as::<_, RankedGame>(
            "SELECT g.id, g.name, g.slug, g.cover,
                    COUNT(l.id) FILTER (
                        WHERE l.disposition = 'sell' AND l.active AND l.public_date <= NOW()
                    ) AS sell_count
             FROM games g
             LEFT JOIN listings l ON l.game_id = g.id
             GROUP BY g.id
             ORDER BY sell_count DESC, g.name ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Update a game. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                cover = COALESCE($4, cover),
                description = COALESCE($5, description),
                eshop_url = COALESCE($6, eshop_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.cover)
            .bind(&input.description)
            .bind(&input.eshop_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a game and, through cascades, every listing of it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
