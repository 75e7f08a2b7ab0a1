//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /                 -> list_notifications
/// POST /                 -> create_notification
/// GET  /unread           -> unread_notifications
/// GET  /unread-count     -> unread_count
/// POST /{id}/mark-read   -> mark_read
/// POST /mark-all-read    -> mark_all_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(notification::list_notifications).post(notification::create_notification),
        )
        .route("/unread", get(notification::unread_notifications))
        .route("/unread-count", get(notification::unread_count))
        .route("/{id}/mark-read", post(notification::mark_read))
        .route("/mark-all-read", post(notification::mark_all_read))
}
