//! Handlers for notifications.
//!
//! The store is served from two mounts: a small read/acknowledge surface
//! under `/messaging/notifications`, and the full subsystem under
//! `/notifications`. Both operate on the same rows, scoped to the caller.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use t2t_core::error::CoreError;
use t2t_core::notification::{NotificationKind, Priority, PRIORITY_MEDIUM};
use t2t_core::types::DbId;
use t2t_db::models::notification::{CreateNotification, Notification};
use t2t_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /notifications`.
#[derive(Debug, Deserialize)]
pub struct CreateNotificationRequest {
    /// Kind string, validated against the closed kind set.
    pub kind: String,
    pub title: String,
    pub message: String,
    /// Priority string; defaults to `medium`.
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    PRIORITY_MEDIUM.to_string()
}

// ---------------------------------------------------------------------------
// Shared listing / acknowledge handlers
// ---------------------------------------------------------------------------

/// GET /api/messaging/notifications and GET /api/notifications
///
/// The caller's notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(notifications))
}

/// PUT /api/messaging/notifications/{id}/read
///
/// Owner-scoped mark-as-read. 404 when the notification is not the caller's.
pub async fn mark_notification_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }))?;

    Ok(Json(serde_json::json!({ "status": "marked as read" })))
}

// ---------------------------------------------------------------------------
// Notification subsystem handlers
// ---------------------------------------------------------------------------

/// POST /api/notifications
///
/// Create a notification for the caller. Returns 201 with the stored row.
pub async fn create_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNotificationRequest>,
) -> AppResult<(StatusCode, Json<Notification>)> {
    let kind = NotificationKind::from_str_value(&input.kind)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    let priority = Priority::from_str_value(&input.priority)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let create = CreateNotification {
        user_id: auth.user_id,
        kind: kind.as_str().to_string(),
        title: input.title,
        message: input.message,
        priority: priority.as_str().to_string(),
    };
    let notification = NotificationRepo::create(&state.pool, &create).await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// GET /api/notifications/unread
///
/// Unread notifications only, newest first.
pub async fn unread_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = NotificationRepo::list_unread_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications/unread-count
///
/// Number of unread notifications for the caller.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(serde_json::json!({ "count": count })))
}

/// POST /api/notifications/{id}/mark-read
///
/// Idempotent mark-as-read: the first call stamps `read_at`, repeats return
/// the stored row unchanged. 404 when the notification is not the caller's.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(notification_id): Path<DbId>,
) -> AppResult<Json<Notification>> {
    let notification = NotificationRepo::mark_read(&state.pool, notification_id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id: notification_id,
        }))?;

    Ok(Json(notification))
}

/// POST /api/notifications/mark-all-read
///
/// Mark every unread notification as read in one statement, so all affected
/// rows share the same `read_at` stamp. Returns the affected count.
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let count = NotificationRepo::mark_all_read(&state.pool, auth.user_id).await?;

    Ok(Json(serde_json::json!({
        "message": format!("{count} notification(s) marked as read"),
        "count": count,
    })))
}
