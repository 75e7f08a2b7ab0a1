//! Route definitions for the `/messaging` resource.
//!
//! All endpoints require authentication. The notification routes here are
//! the legacy read/acknowledge surface; the full subsystem lives under
//! `/notifications`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{messaging, notification};
use crate::state::AppState;

/// Routes mounted at `/messaging`.
///
/// ```text
/// GET  /conversations                -> my_conversations
/// GET  /conversations/{id}/messages  -> conversation_messages
/// POST /messages/send                -> send_message
/// GET  /notifications                -> list_notifications
/// PUT  /notifications/{id}/read      -> mark_notification_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(messaging::my_conversations))
        .route(
            "/conversations/{id}/messages",
            get(messaging::conversation_messages),
        )
        .route("/messages/send", post(messaging::send_message))
        .route("/notifications", get(notification::list_notifications))
        .route(
            "/notifications/{id}/read",
            put(notification::mark_notification_read),
        )
}
