//! Repository for the `dialogs` and `messages` tables.

use sqlx::PgPool;
use switchdeck_core::types::DbId;
use uuid::Uuid;

use crate::models::dialog::{Dialog, DialogSummary, Message};

const DIALOG_COLUMNS: &str = "id, participant1_id, participant2_id, created_at, updated_at";
const MESSAGE_COLUMNS: &str = "id, dialog_id, sender_id, text, created_at, updated_at";

pub struct DialogRepo;

impl DialogRepo {
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Dialog>, sqlx::Error> {
        let query = format!("SELECT {DIALOG_COLUMNS} FROM dialogs WHERE id = $1");
        sqlx::query_as::<_, Dialog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return the dialog between two distinct users, creating it if needed.
    /// Participant order does not matter.
    pub async fn get_or_create(
        pool: &PgPool,
        user_a: DbId,
        user_b: DbId,
    ) -> Result<Dialog, sqlx::Error> {
        let (first, second) = if user_a < user_b {
            (user_a, user_b)
        } else {
            (user_b, user_a)
        };

        let insert = format!(
            "INSERT INTO dialogs (participant1_id, participant2_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_dialogs_participants DO NOTHING
             RETURNING {DIALOG_COLUMNS}"
        );
        if let Some(dialog) = sqlx::query_as::<_, Dialog>(&insert)
            .bind(first)
            .bind(second)
            .fetch_optional(pool)
            .await?
        {
            return Ok(dialog);
        }

        let select = format!(
            "SELECT {DIALOG_COLUMNS} FROM dialogs
             WHERE participant1_id = $1 AND participant2_id = $2"
        );
        sqlx::query_as::<_, Dialog>(&select)
            .bind(first)
            .bind(second)
            .fetch_one(pool)
            .await
    }

    /// Dialogs of a user, most recently active first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DialogSummary>, sqlx::Error> {
        sqlx::query_as::<_, DialogSummary>(
            "SELECT d.id, u.id AS other_user_id, u.username AS other_username,
                    (SELECT MAX(m.created_at) FROM messages m WHERE m.dialog_id = d.id)
                        AS last_message_at
             FROM dialogs d
             JOIN users u ON u.id = CASE
                 WHEN d.participant1_id = $1 THEN d.participant2_id
                 ELSE d.participant1_id
             END
             WHERE d.participant1_id = $1 OR d.participant2_id = $1
             ORDER BY last_message_at DESC NULLS LAST, d.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Messages of a dialog, newest first.
    pub async fn list_messages(
        pool: &PgPool,
        dialog_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages
             WHERE dialog_id = $1
             ORDER BY created_at DESC, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(dialog_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn create_message(
        pool: &PgPool,
        dialog_id: Uuid,
        sender_id: DbId,
        text: &str,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (dialog_id, sender_id, text)
             VALUES ($1, $2, $3)
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(dialog_id)
            .bind(sender_id)
            .bind(text)
            .fetch_one(pool)
            .await
    }
}
