//! Repository for the `places` table.

use sqlx::PgPool;
use switchdeck_core::error::CoreError;
use switchdeck_core::types::DbId;

use crate::error::DbError;
use crate::models::place::{CreatePlace, Place, UpdatePlace};

const COLUMNS: &str = "id, name, slug, popularity, created_at, updated_at";

pub struct PlaceRepo;

impl PlaceRepo {
    /// Insert a place with an already resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlace,
        slug: &str,
    ) -> Result<Place, sqlx::Error> {
        let query = format!(
            "INSERT INTO places (name, slug, popularity)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(input.popularity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE slug = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Exact, case-sensitive name lookup used by search.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places WHERE name = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// All places, most popular first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Place>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM places ORDER BY popularity DESC, name ASC");
        sqlx::query_as::<_, Place>(&query).fetch_all(pool).await
    }

    /// Update a place. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!(
            "UPDATE places SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                popularity = COALESCE($4, popularity)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.popularity)
            .fetch_optional(pool)
            .await
    }

    /// Delete a place, first moving every profile registered there to
    /// `default_place_id`. The default place itself cannot be deleted.
    ///
    /// Returns `false` if no place with `id` exists.
    pub async fn delete_reassigning(
        pool: &PgPool,
        id: DbId,
        default_place_id: DbId,
    ) -> Result<bool, DbError> {
        if id == default_place_id {
            return Err(CoreError::Conflict("The default place cannot be deleted".into()).into());
        }

        let mut tx = pool.begin().await?;

        let moved = sqlx::query("UPDATE profiles SET place_id = $2 WHERE place_id = $1")
            .bind(id)
            .bind(default_place_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        if deleted > 0 {
            tracing::debug!(place_id = id, moved, "Profiles reassigned to default place");
        }
        Ok(deleted > 0)
    }
}
