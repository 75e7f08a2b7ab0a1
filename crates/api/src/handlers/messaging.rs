//! Handlers for the `/messaging` resource (conversations and messages).
//!
//! All endpoints require authentication. Conversations you are not part of
//! behave as if they do not exist (404), matching the owner-scoped lookups.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use t2t_core::error::CoreError;
use t2t_core::types::{DbId, Timestamp};
use t2t_db::models::conversation::{CreateMessage, Message};
use t2t_db::repositories::{ConversationRepo, MessageRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Characters of message content carried into the notification body.
const NOTIFICATION_PREVIEW_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /messaging/messages/send`.
///
/// Exactly one of `conversation_id` / `receiver_id` is needed; when both are
/// present, `conversation_id` wins.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub conversation_id: Option<DbId>,
    pub receiver_id: Option<DbId>,
    pub content: String,
}

/// A message with its sender's username embedded.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: DbId,
    pub conversation_id: DbId,
    /// Sender's username.
    pub sender: String,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A conversation summary with participant names and the latest message.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: DbId,
    /// Participant usernames, ordered by user id.
    pub participants: Vec<String>,
    pub last_message: Option<MessageResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/messaging/conversations
///
/// The caller's conversations, most recently active first.
pub async fn my_conversations(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ConversationResponse>>> {
    let conversations = ConversationRepo::list_for_user(&state.pool, auth.user_id).await?;
    let ids: Vec<DbId> = conversations.iter().map(|c| c.id).collect();

    let participant_rows =
        ConversationRepo::participants_for_conversations(&state.pool, &ids).await?;
    let last_messages = MessageRepo::last_for_conversations(&state.pool, &ids).await?;

    // Resolve every participant and last-message sender in one query.
    let mut user_ids: Vec<DbId> = participant_rows.iter().map(|(_, user_id)| *user_id).collect();
    user_ids.extend(last_messages.iter().map(|m| m.sender_id));
    user_ids.sort_unstable();
    user_ids.dedup();

    let usernames: HashMap<DbId, String> = UserRepo::list_by_ids(&state.pool, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();
    let username_of = |id: DbId| {
        usernames
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    };

    let mut participants_by_conversation: HashMap<DbId, Vec<String>> = HashMap::new();
    for (conversation_id, user_id) in participant_rows {
        participants_by_conversation
            .entry(conversation_id)
            .or_default()
            .push(username_of(user_id));
    }

    let mut last_by_conversation: HashMap<DbId, MessageResponse> = HashMap::new();
    for message in last_messages {
        let sender = username_of(message.sender_id);
        last_by_conversation.insert(message.conversation_id, to_message_response(message, sender));
    }

    let responses = conversations
        .into_iter()
        .map(|c| ConversationResponse {
            participants: participants_by_conversation.remove(&c.id).unwrap_or_default(),
            last_message: last_by_conversation.remove(&c.id),
            id: c.id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        })
        .collect();

    Ok(Json(responses))
}

/// GET /api/messaging/conversations/{id}/messages
///
/// Messages in a conversation, oldest first. 404 unless the caller
/// participates.
pub async fn conversation_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(conversation_id): Path<DbId>,
) -> AppResult<Json<Vec<MessageResponse>>> {
    let is_participant =
        ConversationRepo::is_participant(&state.pool, conversation_id, auth.user_id).await?;
    if !is_participant {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id: conversation_id,
        }));
    }

    let messages = MessageRepo::list_for_conversation(&state.pool, conversation_id).await?;

    let mut sender_ids: Vec<DbId> = messages.iter().map(|m| m.sender_id).collect();
    sender_ids.sort_unstable();
    sender_ids.dedup();
    let usernames: HashMap<DbId, String> = UserRepo::list_by_ids(&state.pool, &sender_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let responses = messages
        .into_iter()
        .map(|m| {
            let sender = usernames
                .get(&m.sender_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            to_message_response(m, sender)
        })
        .collect();

    Ok(Json(responses))
}

/// POST /api/messaging/messages/send
///
/// Send a message into an existing conversation (`conversation_id`) or to a
/// user (`receiver_id`), creating the conversation on first contact. Returns
/// 201 with the message view.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SendMessageRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    if input.content.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message content must not be empty".into(),
        )));
    }

    let sender = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let notification_title = format!("New message from {}", sender.username);
    let preview: String = input.content.chars().take(NOTIFICATION_PREVIEW_CHARS).collect();

    let message = match (input.conversation_id, input.receiver_id) {
        (Some(conversation_id), _) => {
            let is_participant =
                ConversationRepo::is_participant(&state.pool, conversation_id, auth.user_id)
                    .await?;
            if !is_participant {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Conversation",
                    id: conversation_id,
                }));
            }

            let create = CreateMessage {
                conversation_id,
                sender_id: auth.user_id,
                content: input.content,
            };
            MessageRepo::append(&state.pool, &create, &notification_title, &preview).await?
        }
        (None, Some(receiver_id)) => {
            let receiver = UserRepo::find_by_id(&state.pool, receiver_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "User",
                    id: receiver_id,
                }))?;
            if receiver.id == auth.user_id {
                return Err(AppError::Core(CoreError::Validation(
                    "Cannot send a message to yourself".into(),
                )));
            }

            MessageRepo::send_to_pair(
                &state.pool,
                auth.user_id,
                receiver.id,
                &input.content,
                &notification_title,
                &preview,
            )
            .await?
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "conversation_id or receiver_id required".into(),
            ));
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(to_message_response(message, sender.username)),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pair a message row with its sender's username.
fn to_message_response(message: Message, sender: String) -> MessageResponse {
    MessageResponse {
        id: message.id,
        conversation_id: message.conversation_id,
        sender,
        content: message.content,
        is_read: message.is_read,
        created_at: message.created_at,
    }
}
