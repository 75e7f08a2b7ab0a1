//! Handlers for the `/waste` listing endpoints.
//!
//! The browse endpoints are public; creating and listing your own
//! material requires authentication.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use t2t_core::error::CoreError;
use t2t_core::listing::{validate_price, validate_quantity};
use t2t_core::types::{DbId, Timestamp};
use t2t_db::models::listing::{CreateListing, ListingFilter, WasteImage, WasteListing};
use t2t_db::repositories::{ListingRepo, UserRepo, WasteImageRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /waste/listings`.
///
/// All filters are optional and combine conjunctively.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Exact waste type match (`?type=plastic`).
    #[serde(rename = "type")]
    pub waste_type: Option<String>,
    /// Case-insensitive substring match on location.
    pub location: Option<String>,
    /// Minimum quantity (inclusive).
    pub min_quantity: Option<f64>,
}

/// A listing with its owner's username and image records embedded.
#[derive(Debug, Clone, Serialize)]
pub struct ListingResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub waste_type: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_unit: Decimal,
    pub status: String,
    /// Owner's username.
    pub user: String,
    pub images: Vec<WasteImage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ListingResponse {
    fn from_parts(listing: WasteListing, user: String, images: Vec<WasteImage>) -> Self {
        Self {
            id: listing.id,
            title: listing.title,
            description: listing.description,
            waste_type: listing.waste_type,
            quantity: listing.quantity,
            unit: listing.unit,
            location: listing.location,
            latitude: listing.latitude,
            longitude: listing.longitude,
            price_per_unit: listing.price_per_unit,
            status: listing.status,
            user,
            images,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/waste/listings
///
/// Public browse over available listings, newest first.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> AppResult<Json<Vec<ListingResponse>>> {
    let filter = ListingFilter {
        waste_type: params.waste_type,
        location: params.location,
        min_quantity: params.min_quantity,
    };

    let listings = ListingRepo::list_available(&state.pool, &filter).await?;
    let responses = build_listing_responses(&state, listings).await?;

    Ok(Json(responses))
}

/// GET /api/waste/listings/{id}
///
/// Public listing detail, any status.
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListingResponse>> {
    let listing = ListingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id,
        }))?;

    let user = UserRepo::find_by_id(&state.pool, listing.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_else(|| "unknown".to_string());
    let images = WasteImageRepo::list_for_listing(&state.pool, listing.id).await?;

    Ok(Json(ListingResponse::from_parts(listing, user, images)))
}

/// POST /api/waste/listings/create
///
/// Create a listing owned by the caller. Returns 201 with the listing view.
pub async fn create_listing(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<ListingResponse>)> {
    validate_quantity(input.quantity)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    validate_price(input.price_per_unit)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let listing = ListingRepo::create(&state.pool, auth.user_id, &input).await?;

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_else(|| "unknown".to_string());

    // A freshly created listing has no images yet.
    Ok((
        StatusCode::CREATED,
        Json(ListingResponse::from_parts(listing, user, Vec::new())),
    ))
}

/// GET /api/waste/listings/my
///
/// The caller's own listings, any status, newest first.
pub async fn my_listings(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ListingResponse>>> {
    let listings = ListingRepo::list_for_user(&state.pool, auth.user_id).await?;
    let responses = build_listing_responses(&state, listings).await?;

    Ok(Json(responses))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assemble [`ListingResponse`]s for a batch of listings.
///
/// Owners and images are fetched in one query each to avoid N+1 round trips.
pub(crate) async fn build_listing_responses(
    state: &AppState,
    listings: Vec<WasteListing>,
) -> AppResult<Vec<ListingResponse>> {
    let mut user_ids: Vec<DbId> = listings.iter().map(|l| l.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();
    let listing_ids: Vec<DbId> = listings.iter().map(|l| l.id).collect();

    let owners: HashMap<DbId, String> = UserRepo::list_by_ids(&state.pool, &user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let mut images_by_listing: HashMap<DbId, Vec<WasteImage>> = HashMap::new();
    for image in WasteImageRepo::list_for_listings(&state.pool, &listing_ids).await? {
        images_by_listing
            .entry(image.listing_id)
            .or_default()
            .push(image);
    }

    let responses = listings
        .into_iter()
        .map(|listing| {
            let user = owners
                .get(&listing.user_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string());
            let images = images_by_listing.remove(&listing.id).unwrap_or_default();
            ListingResponse::from_parts(listing, user, images)
        })
        .collect();

    Ok(responses)
}
