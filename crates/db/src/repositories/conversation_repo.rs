//! Repository for the `conversations` and `conversation_participants` tables.

use sqlx::PgPool;
use t2t_core::types::DbId;

use crate::models::conversation::Conversation;

/// Provides query operations for conversations and their participants.
///
/// Conversation rows are only ever created inside `MessageRepo::send_to_pair`,
/// so creation lives there with the rest of that composite.
pub struct ConversationRepo;

impl ConversationRepo {
    /// List conversations the user participates in, most recently active first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        sqlx::query_as::<_, Conversation>(
            "SELECT c.id, c.created_at, c.updated_at FROM conversations c \
             JOIN conversation_participants cp ON cp.conversation_id = c.id \
             WHERE cp.user_id = $1 \
             ORDER BY c.updated_at DESC, c.id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Check whether a user participates in a conversation.
    pub async fn is_participant(
        pool: &PgPool,
        conversation_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS ( \
                SELECT 1 FROM conversation_participants \
                WHERE conversation_id = $1 AND user_id = $2)",
        )
        .bind(conversation_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// List participant user IDs for multiple conversations in one round trip.
    ///
    /// Rows come back as `(conversation_id, user_id)` pairs.
    pub async fn participants_for_conversations(
        pool: &PgPool,
        conversation_ids: &[DbId],
    ) -> Result<Vec<(DbId, DbId)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT conversation_id, user_id FROM conversation_participants \
             WHERE conversation_id = ANY($1) \
             ORDER BY conversation_id, user_id",
        )
        .bind(conversation_ids)
        .fetch_all(pool)
        .await
    }
}
