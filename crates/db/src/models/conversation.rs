//! Conversation and message models.
//!
//! A conversation is a bag of participants plus an ordered message log.
//! Participant rows live in `conversation_participants` with a composite
//! primary key, so a user appears in a conversation at most once.

use sqlx::FromRow;
use t2t_core::types::{DbId, Timestamp};

/// A row from the `conversations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Conversation {
    pub id: DbId,
    pub created_at: Timestamp,
    /// Bumped whenever a message lands, so conversation lists sort by
    /// recent activity.
    pub updated_at: Timestamp,
}

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for appending a message to a conversation.
#[derive(Debug)]
pub struct CreateMessage {
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub content: String,
}
