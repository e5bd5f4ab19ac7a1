//! Repository for the `users` table.

use sqlx::PgPool;
use switchdeck_core::types::DbId;

use crate::models::profile::Profile;
use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, role, is_active, created_at, updated_at";

/// Users are only ever created together with their profile.
pub struct UserRepo;

impl UserRepo {
    /// Insert a user together with its marketplace profile in one transaction.
    pub async fn create_with_profile(
        pool: &PgPool,
        input: &CreateUser,
        place_id: DbId,
    ) -> Result<(User, Profile), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO users (username, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(&mut *tx)
            .await?;

        let profile = sqlx::query_as::<_, Profile>(
            "INSERT INTO profiles (user_id, place_id)
             VALUES ($1, $2)
             RETURNING id, user_id, place_id, created_at, updated_at",
        )
        .bind(user.id)
        .bind(place_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((user, profile))
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a user. The profile, its listings, comments and
    /// trade edges go with it through foreign-key cascades.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
