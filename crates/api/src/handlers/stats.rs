//! Dashboard counters for the authenticated user.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use t2t_db::repositories::{ListingRepo, NotificationRepo, TransactionRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Counter block returned by `GET /waste/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Listings the caller has ever posted.
    pub total_listings: i64,
    /// Of those, how many are currently available.
    pub available_listings: i64,
    /// Transactions where the caller is buyer or seller.
    pub transaction_count: i64,
    /// Unread notifications.
    pub unread_notifications: i64,
}

/// GET /api/waste/stats
///
/// Aggregate counters for the caller's dashboard.
pub async fn my_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponse>> {
    let listing_stats = ListingRepo::stats_for_user(&state.pool, auth.user_id).await?;
    let transaction_count = TransactionRepo::count_for_user(&state.pool, auth.user_id).await?;
    let unread_notifications = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(StatsResponse {
        total_listings: listing_stats.total_listings,
        available_listings: listing_stats.available_listings,
        transaction_count,
        unread_notifications,
    }))
}
