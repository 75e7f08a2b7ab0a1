//! Notification kind and priority constants.
//!
//! These must match the CHECK constraints on `notifications.kind` and
//! `notifications.priority`, and the values the API handlers write when
//! marketplace or messaging events fire.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

/// A new message arrived in one of the user's conversations.
pub const KIND_MESSAGE: &str = "message";

/// A listing the user may care about was posted or changed.
pub const KIND_LISTING: &str = "listing";

/// One of the user's transactions was created or changed state.
pub const KIND_TRANSACTION: &str = "transaction";

/// A pickup was scheduled for the user's material.
pub const KIND_PICKUP_SCHEDULED: &str = "pickup_scheduled";

/// A scheduled pickup was completed.
pub const KIND_PICKUP_COMPLETED: &str = "pickup_completed";

/// A scheduled pickup was cancelled.
pub const KIND_PICKUP_CANCELLED: &str = "pickup_cancelled";

/// A payment reached the user's account.
pub const KIND_PAYMENT_RECEIVED: &str = "payment_received";

/// Platform-level notice.
pub const KIND_SYSTEM: &str = "system";

/// All valid notification kind strings.
pub const VALID_KINDS: &[&str] = &[
    KIND_MESSAGE,
    KIND_LISTING,
    KIND_TRANSACTION,
    KIND_PICKUP_SCHEDULED,
    KIND_PICKUP_COMPLETED,
    KIND_PICKUP_CANCELLED,
    KIND_PAYMENT_RECEIVED,
    KIND_SYSTEM,
];

// ---------------------------------------------------------------------------
// Priorities
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid priority strings.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What event a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Message,
    Listing,
    Transaction,
    PickupScheduled,
    PickupCompleted,
    PickupCancelled,
    PaymentReceived,
    System,
}

impl NotificationKind {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            KIND_MESSAGE => Ok(Self::Message),
            KIND_LISTING => Ok(Self::Listing),
            KIND_TRANSACTION => Ok(Self::Transaction),
            KIND_PICKUP_SCHEDULED => Ok(Self::PickupScheduled),
            KIND_PICKUP_COMPLETED => Ok(Self::PickupCompleted),
            KIND_PICKUP_CANCELLED => Ok(Self::PickupCancelled),
            KIND_PAYMENT_RECEIVED => Ok(Self::PaymentReceived),
            KIND_SYSTEM => Ok(Self::System),
            _ => Err(format!(
                "Invalid notification kind '{s}'. Must be one of: {}",
                VALID_KINDS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => KIND_MESSAGE,
            Self::Listing => KIND_LISTING,
            Self::Transaction => KIND_TRANSACTION,
            Self::PickupScheduled => KIND_PICKUP_SCHEDULED,
            Self::PickupCompleted => KIND_PICKUP_COMPLETED,
            Self::PickupCancelled => KIND_PICKUP_CANCELLED,
            Self::PaymentReceived => KIND_PAYMENT_RECEIVED,
            Self::System => KIND_SYSTEM,
        }
    }
}

/// Urgency of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            _ => Err(format!(
                "Invalid priority '{s}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
        }
    }
}
