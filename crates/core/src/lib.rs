//! Domain types shared across the TrashToTreasure backend.
//!
//! Holds the closed enumerations (roles, waste types, statuses, notification
//! kinds), the core error taxonomy, and validation helpers used by both the
//! DB and API layers.

pub mod error;
pub mod listing;
pub mod notification;
pub mod roles;
pub mod transaction;
pub mod types;
