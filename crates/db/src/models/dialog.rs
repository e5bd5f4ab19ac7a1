//! Direct-message dialogs between two users.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use switchdeck_core::types::{DbId, Timestamp};
use uuid::Uuid;
use validator::Validate;

/// A row from the `dialogs` table. `participant1_id < participant2_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dialog {
    pub id: Uuid,
    pub participant1_id: DbId,
    pub participant2_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Dialog {
    pub fn has_participant(&self, user_id: DbId) -> bool {
        self.participant1_id == user_id || self.participant2_id == user_id
    }
}

/// A dialog as seen by one participant.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DialogSummary {
    pub id: Uuid,
    pub other_user_id: DbId,
    pub other_username: String,
    pub last_message_at: Option<Timestamp>,
}

/// A row from the `messages` table. The sender is cleared when the
/// sending user is deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub dialog_id: Uuid,
    pub sender_id: Option<DbId>,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OpenDialog {
    #[validate(length(min = 1))]
    pub username: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMessage {
    #[validate(length(min = 1, max = 200))]
    pub text: String,
}
