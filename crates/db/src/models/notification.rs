//! Notification model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use t2t_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Kind string from the closed set in `t2t_core::notification`.
    pub kind: String,
    pub title: String,
    pub message: String,
    /// Priority string from the closed set in `t2t_core::notification`.
    pub priority: String,
    pub is_read: bool,
    /// Stamped exactly once, when the notification is first marked read.
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub user_id: DbId,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub priority: String,
}
