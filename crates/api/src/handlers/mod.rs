//! HTTP request handlers, one module per resource.
//!
//! Handlers delegate to the repositories in `t2t_db` and map errors via
//! [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod listing;
pub mod messaging;
pub mod notification;
pub mod stats;
pub mod transaction;
