//! Route definitions for the `/waste` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{listing, stats, transaction};
use crate::state::AppState;

/// Routes mounted at `/waste`.
///
/// The browse routes are public; everything else requires authentication.
///
/// ```text
/// GET  /listings          -> list_listings (public, filterable)
/// POST /listings/create   -> create_listing
/// GET  /listings/my       -> my_listings
/// GET  /listings/{id}     -> get_listing (public)
/// GET  /transactions/my   -> my_transactions
/// POST /transactions      -> create_transaction (buyer/admin)
/// GET  /stats             -> my_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/listings", get(listing::list_listings))
        .route("/listings/create", post(listing::create_listing))
        .route("/listings/my", get(listing::my_listings))
        .route("/listings/{id}", get(listing::get_listing))
        .route("/transactions/my", get(transaction::my_transactions))
        .route("/transactions", post(transaction::create_transaction))
        .route("/stats", get(stats::my_stats))
}
