//! Repository for the `profiles` table.

use sqlx::PgPool;
use switchdeck_core::types::DbId;

use crate::models::profile::{Profile, ProfileView};

const COLUMNS: &str = "id, user_id, place_id, created_at, updated_at";

const VIEW_SELECT: &str = "SELECT p.id, p.user_id, u.username, p.place_id, \
                           pl.name AS place_name, pl.slug AS place_slug, p.created_at \
                           FROM profiles p \
                           JOIN users u ON u.id = p.user_id \
                           JOIN places pl ON pl.id = p.place_id";

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The profile id of a user together with the user's `is_active` flag.
    pub async fn find_actor(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<(DbId, bool)>, sqlx::Error> {
        sqlx::query_as::<_, (DbId, bool)>(
            "SELECT p.id, u.is_active
             FROM profiles p
             JOIN users u ON u.id = p.user_id
             WHERE p.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_view_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ProfileView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE p.user_id = $1");
        sqlx::query_as::<_, ProfileView>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_view_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<ProfileView>, sqlx::Error> {
        let query = format!("{VIEW_SELECT} WHERE u.username = $1");
        sqlx::query_as::<_, ProfileView>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Move a profile to another place. Returns `None` if the profile does
    /// not exist; an unknown place violates `fk_profiles_place`.
    pub async fn update_place(
        pool: &PgPool,
        id: DbId,
        place_id: DbId,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!(
            "UPDATE profiles SET place_id = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .bind(place_id)
            .fetch_optional(pool)
            .await
    }
}
