pub mod admin;
pub mod auth;
pub mod health;
pub mod messaging;
pub mod notification;
pub mod waste;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                          register (public)
/// /auth/login                             login (public)
/// /auth/token/refresh                     refresh (public)
/// /auth/logout                            logout (requires auth)
/// /auth/profile                           get, update profile
///
/// /waste/listings                         browse available listings (public)
/// /waste/listings/{id}                    listing detail (public)
/// /waste/listings/create                  create listing (POST)
/// /waste/listings/my                      own listings
/// /waste/transactions/my                  own transactions
/// /waste/transactions                     record a sale (POST, buyer/admin)
/// /waste/stats                            dashboard counters
///
/// /messaging/conversations                list conversations
/// /messaging/conversations/{id}/messages  conversation messages
/// /messaging/messages/send                send message (POST)
/// /messaging/notifications                list notifications
/// /messaging/notifications/{id}/read      acknowledge one (PUT)
///
/// /notifications                          list, create
/// /notifications/unread                   unread only
/// /notifications/unread-count             unread counter
/// /notifications/{id}/mark-read           idempotent acknowledge (POST)
/// /notifications/mark-all-read            bulk acknowledge (POST)
///
/// /admin/users                            list users (admin only)
/// /admin/users/{id}                       update role and flags (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication and profile
        .nest("/auth", auth::router())
        // Marketplace: listings, transactions, dashboard counters
        .nest("/waste", waste::router())
        // Conversations, messages, legacy notification mount
        .nest("/messaging", messaging::router())
        // Notification subsystem
        .nest("/notifications", notification::router())
        // User administration
        .nest("/admin", admin::router())
}
