//! Handlers for the `/waste` transaction endpoints.
//!
//! Recording a sale reserves the listing and notifies the seller inside a
//! single database transaction; see `TransactionRepo::create_with_notification`.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use t2t_core::error::CoreError;
use t2t_core::listing::STATUS_AVAILABLE;
use t2t_core::notification::{KIND_TRANSACTION, PRIORITY_HIGH};
use t2t_core::transaction::{compute_total_amount, validate_transaction_parties};
use t2t_core::types::{DbId, Timestamp};
use t2t_db::models::notification::CreateNotification;
use t2t_db::models::transaction::{CreateTransaction, Transaction};
use t2t_db::repositories::{ListingRepo, TransactionRepo, UserRepo};

use super::listing::{build_listing_responses, ListingResponse};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireBuyer;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /waste/transactions`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub listing_id: DbId,
    pub quantity: f64,
    #[serde(default)]
    pub delivery_address: String,
    pub pickup_date: Option<Timestamp>,
}

/// A transaction with its listing view and party usernames embedded.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: DbId,
    pub listing: Option<ListingResponse>,
    /// Buyer's username.
    pub buyer: String,
    /// Seller's username.
    pub seller: String,
    pub quantity: f64,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_reference: String,
    pub delivery_address: String,
    pub pickup_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/waste/transactions/my
///
/// Transactions where the caller is buyer or seller, newest first.
pub async fn my_transactions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TransactionResponse>>> {
    let transactions = TransactionRepo::list_for_user(&state.pool, auth.user_id).await?;
    let responses = build_transaction_responses(&state, transactions).await?;

    Ok(Json(responses))
}

/// POST /api/waste/transactions
///
/// Record a sale against an available listing. The caller becomes the buyer,
/// the listing owner the seller. Requires the `buyer` or `admin` role.
pub async fn create_transaction(
    RequireBuyer(auth): RequireBuyer,
    State(state): State<AppState>,
    Json(input): Json<CreateTransactionRequest>,
) -> AppResult<(StatusCode, Json<TransactionResponse>)> {
    if !input.quantity.is_finite() || input.quantity <= 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Quantity must be a positive number".into(),
        )));
    }

    // 1. The listing must exist and still be available.
    let listing = ListingRepo::find_by_id(&state.pool, input.listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: input.listing_id,
        }))?;

    if listing.status != STATUS_AVAILABLE {
        return Err(AppError::BadRequest("Listing is not available".into()));
    }

    // 2. You cannot buy from yourself.
    validate_transaction_parties(auth.user_id, listing.user_id)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // 3. Cannot buy more than is on offer.
    if input.quantity > listing.quantity {
        return Err(AppError::Core(CoreError::Validation(
            "Requested quantity exceeds the listed quantity".into(),
        )));
    }

    // 4. Server-side total: listed price times quantity, 2 decimal places.
    let total_amount = compute_total_amount(listing.price_per_unit, input.quantity)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let buyer = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    let create = CreateTransaction {
        listing_id: listing.id,
        buyer_id: auth.user_id,
        seller_id: listing.user_id,
        quantity: input.quantity,
        total_amount,
        delivery_address: input.delivery_address,
        pickup_date: input.pickup_date,
    };
    let notification = CreateNotification {
        user_id: listing.user_id,
        kind: KIND_TRANSACTION.to_string(),
        title: "New purchase request".to_string(),
        message: format!(
            "{} wants to buy {} {} of '{}'",
            buyer.username, input.quantity, listing.unit, listing.title
        ),
        priority: PRIORITY_HIGH.to_string(),
    };

    // 5. Reserve the listing, insert the row, and notify the seller atomically.
    //    None means another buyer reserved the listing first.
    let transaction =
        TransactionRepo::create_with_notification(&state.pool, &create, &notification)
            .await?
            .ok_or_else(|| AppError::BadRequest("Listing is not available".into()))?;

    // One transaction in, one response out.
    let mut responses = build_transaction_responses(&state, vec![transaction]).await?;
    let response = responses
        .pop()
        .ok_or_else(|| AppError::InternalError("Transaction response assembly failed".into()))?;

    Ok((StatusCode::CREATED, Json(response)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assemble [`TransactionResponse`]s for a batch of transactions.
///
/// Listings (with their owners and images) and party usernames are fetched
/// in bulk to avoid N+1 round trips.
async fn build_transaction_responses(
    state: &AppState,
    transactions: Vec<Transaction>,
) -> AppResult<Vec<TransactionResponse>> {
    let mut listing_ids: Vec<DbId> = transactions.iter().map(|t| t.listing_id).collect();
    listing_ids.sort_unstable();
    listing_ids.dedup();

    let mut user_ids: Vec<DbId> = transactions
        .iter()
        .flat_map(|t| [t.buyer_id, t.seller_id])
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let listings = ListingRepo::list_by_ids(&state.pool, &listing_ids).await?;
    let listing_views: HashMap<DbId, ListingResponse> =
        build_listing_responses(state, listings)
            .await?
            .into_iter()
            .map(|view| (view.id, view))
            .collect();

    let usernames: HashMap<DbId, String> = UserRepo::list_by_ids(&state.pool, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let username_of = |id: DbId| {
        usernames
            .get(&id)
            .cloned()
            .unwrap_or_else(|| "unknown".to_string())
    };

    let responses = transactions
        .into_iter()
        .map(|t| TransactionResponse {
            listing: listing_views.get(&t.listing_id).cloned(),
            buyer: username_of(t.buyer_id),
            seller: username_of(t.seller_id),
            id: t.id,
            quantity: t.quantity,
            total_amount: t.total_amount,
            status: t.status,
            payment_reference: t.payment_reference,
            delivery_address: t.delivery_address,
            pickup_date: t.pickup_date,
            created_at: t.created_at,
            updated_at: t.updated_at,
        })
        .collect();

    Ok(responses)
}
