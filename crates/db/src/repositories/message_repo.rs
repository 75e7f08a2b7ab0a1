//! Repository for the `messages` table.
//!
//! Sending a message is never a single insert: the conversation's
//! `updated_at` must move, recipients get a `message` notification, and on
//! first contact the conversation itself has to be created. Those steps run
//! as composites inside one database transaction so a failure cannot leave,
//! say, a message without its notification.

use sqlx::PgPool;
use t2t_core::notification::{KIND_MESSAGE, PRIORITY_MEDIUM};
use t2t_core::types::DbId;

use crate::models::conversation::{CreateMessage, Message};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, conversation_id, sender_id, content, is_read, created_at";

/// Provides operations for messages and the send composites.
pub struct MessageRepo;

impl MessageRepo {
    /// Append a message to an existing conversation.
    ///
    /// In one transaction: inserts the message, bumps the conversation's
    /// `updated_at`, and writes a `message` notification for every other
    /// participant. The caller is responsible for the participant check.
    pub async fn append(
        pool: &PgPool,
        input: &CreateMessage,
        notification_title: &str,
        notification_body: &str,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let message =
            insert_message(&mut tx, input.conversation_id, input.sender_id, &input.content)
                .await?;
        notify_other_participants(
            &mut tx,
            input.conversation_id,
            input.sender_id,
            notification_title,
            notification_body,
        )
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// Send a message to a specific user, creating the conversation on first
    /// contact.
    ///
    /// The conversation is keyed on the exact participant pair: an existing
    /// conversation is reused only when its participant set is precisely
    /// `{sender, receiver}`. Everything runs in one transaction.
    pub async fn send_to_pair(
        pool: &PgPool,
        sender_id: DbId,
        receiver_id: DbId,
        content: &str,
        notification_title: &str,
        notification_body: &str,
    ) -> Result<Message, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Look for a conversation whose participants are exactly this pair.
        let existing: Option<DbId> = sqlx::query_scalar(
            "SELECT c.id FROM conversations c \
             WHERE EXISTS (SELECT 1 FROM conversation_participants \
                           WHERE conversation_id = c.id AND user_id = $1) \
               AND EXISTS (SELECT 1 FROM conversation_participants \
                           WHERE conversation_id = c.id AND user_id = $2) \
               AND (SELECT COUNT(*) FROM conversation_participants \
                    WHERE conversation_id = c.id) = 2 \
             ORDER BY c.id \
             LIMIT 1",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_optional(&mut *tx)
        .await?;

        let conversation_id = match existing {
            Some(id) => id,
            None => {
                let id: DbId =
                    sqlx::query_scalar("INSERT INTO conversations DEFAULT VALUES RETURNING id")
                        .fetch_one(&mut *tx)
                        .await?;
                sqlx::query(
                    "INSERT INTO conversation_participants (conversation_id, user_id) \
                     VALUES ($1, $2), ($1, $3)",
                )
                .bind(id)
                .bind(sender_id)
                .bind(receiver_id)
                .execute(&mut *tx)
                .await?;
                id
            }
        };

        let message = insert_message(&mut tx, conversation_id, sender_id, content).await?;
        notify_other_participants(
            &mut tx,
            conversation_id,
            sender_id,
            notification_title,
            notification_body,
        )
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    /// List a conversation's messages, oldest first.
    pub async fn list_for_conversation(
        pool: &PgPool,
        conversation_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages \
             WHERE conversation_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_id)
            .fetch_all(pool)
            .await
    }

    /// Find the latest message in each of the given conversations.
    ///
    /// Uses `DISTINCT ON` to select the most recent row per conversation in
    /// one round trip.
    pub async fn last_for_conversations(
        pool: &PgPool,
        conversation_ids: &[DbId],
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (conversation_id) {COLUMNS} FROM messages \
             WHERE conversation_id = ANY($1) \
             ORDER BY conversation_id, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(conversation_ids)
            .fetch_all(pool)
            .await
    }
}

/// Insert a message and bump the conversation's `updated_at`.
async fn insert_message(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    conversation_id: DbId,
    sender_id: DbId,
    content: &str,
) -> Result<Message, sqlx::Error> {
    let query = format!(
        "INSERT INTO messages (conversation_id, sender_id, content)
         VALUES ($1, $2, $3)
         RETURNING {COLUMNS}"
    );
    let message = sqlx::query_as::<_, Message>(&query)
        .bind(conversation_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&mut **tx)
        .await?;

    sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
        .bind(conversation_id)
        .execute(&mut **tx)
        .await?;

    Ok(message)
}

/// Write a `message` notification for every participant except the sender.
async fn notify_other_participants(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    conversation_id: DbId,
    sender_id: DbId,
    title: &str,
    body: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO notifications (user_id, kind, title, message, priority) \
         SELECT user_id, $3, $4, $5, $6 FROM conversation_participants \
         WHERE conversation_id = $1 AND user_id <> $2",
    )
    .bind(conversation_id)
    .bind(sender_id)
    .bind(KIND_MESSAGE)
    .bind(title)
    .bind(body)
    .bind(PRIORITY_MEDIUM)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
