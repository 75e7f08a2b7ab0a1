//! Waste listing and listing image models and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use t2t_core::listing::WasteType;
use t2t_core::types::{DbId, Timestamp};

/// A row from the `waste_listings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WasteListing {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Waste type string from the closed set in `t2t_core::listing`.
    pub waste_type: String,
    pub quantity: f64,
    pub unit: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_unit: Decimal,
    /// Status string from the closed set in `t2t_core::listing`.
    pub status: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `waste_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WasteImage {
    pub id: DbId,
    pub listing_id: DbId,
    pub image_path: String,
    pub caption: String,
    pub created_at: Timestamp,
}

/// DTO for creating a listing.
///
/// `waste_type` deserializes through the closed enum so an unknown kind is
/// rejected at the boundary. Status is not accepted: new listings always
/// start as `available`.
#[derive(Debug, Deserialize)]
pub struct CreateListing {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub waste_type: WasteType,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price_per_unit: Decimal,
}

fn default_unit() -> String {
    "kg".to_string()
}

/// DTO for attaching an image record to a listing.
#[derive(Debug, Deserialize)]
pub struct CreateWasteImage {
    pub listing_id: DbId,
    pub image_path: String,
    #[serde(default)]
    pub caption: String,
}

/// Conjunctive filters for the public available-listings query.
#[derive(Debug, Default)]
pub struct ListingFilter {
    /// Exact match on `waste_type`. Unknown values simply match nothing.
    pub waste_type: Option<String>,
    /// Case-insensitive substring match on `location`.
    pub location: Option<String>,
    /// Lower bound on `quantity` (inclusive).
    pub min_quantity: Option<f64>,
}

/// Aggregate listing counts for one user's dashboard.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingStats {
    pub total_listings: i64,
    pub available_listings: i64,
}
