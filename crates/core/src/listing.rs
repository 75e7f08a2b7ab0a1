//! Waste listing constants, closed enums, and validation helpers.
//!
//! The string sets must match the CHECK constraints on
//! `waste_listings.waste_type` and `waste_listings.status`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Waste types
// ---------------------------------------------------------------------------

pub const WASTE_PLASTIC: &str = "plastic";
pub const WASTE_PAPER: &str = "paper";
pub const WASTE_METAL: &str = "metal";
pub const WASTE_GLASS: &str = "glass";
pub const WASTE_ELECTRONIC: &str = "electronic";
pub const WASTE_ORGANIC: &str = "organic";
pub const WASTE_TEXTILE: &str = "textile";
pub const WASTE_OTHER: &str = "other";

/// All valid waste type strings.
pub const VALID_WASTE_TYPES: &[&str] = &[
    WASTE_PLASTIC,
    WASTE_PAPER,
    WASTE_METAL,
    WASTE_GLASS,
    WASTE_ELECTRONIC,
    WASTE_ORGANIC,
    WASTE_TEXTILE,
    WASTE_OTHER,
];

// ---------------------------------------------------------------------------
// Listing statuses
// ---------------------------------------------------------------------------

pub const STATUS_AVAILABLE: &str = "available";
pub const STATUS_RESERVED: &str = "reserved";
pub const STATUS_SOLD: &str = "sold";
pub const STATUS_EXPIRED: &str = "expired";

/// All valid listing status strings.
///
/// Membership is checked; transitions are not. Any status may follow any
/// other.
pub const VALID_LISTING_STATUSES: &[&str] =
    &[STATUS_AVAILABLE, STATUS_RESERVED, STATUS_SOLD, STATUS_EXPIRED];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of waste material offered in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Plastic,
    Paper,
    Metal,
    Glass,
    Electronic,
    Organic,
    Textile,
    Other,
}

impl WasteType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            WASTE_PLASTIC => Ok(Self::Plastic),
            WASTE_PAPER => Ok(Self::Paper),
            WASTE_METAL => Ok(Self::Metal),
            WASTE_GLASS => Ok(Self::Glass),
            WASTE_ELECTRONIC => Ok(Self::Electronic),
            WASTE_ORGANIC => Ok(Self::Organic),
            WASTE_TEXTILE => Ok(Self::Textile),
            WASTE_OTHER => Ok(Self::Other),
            _ => Err(format!(
                "Invalid waste type '{s}'. Must be one of: {}",
                VALID_WASTE_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plastic => WASTE_PLASTIC,
            Self::Paper => WASTE_PAPER,
            Self::Metal => WASTE_METAL,
            Self::Glass => WASTE_GLASS,
            Self::Electronic => WASTE_ELECTRONIC,
            Self::Organic => WASTE_ORGANIC,
            Self::Textile => WASTE_TEXTILE,
            Self::Other => WASTE_OTHER,
        }
    }
}

/// Sale state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Available,
    Reserved,
    Sold,
    Expired,
}

impl ListingStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_AVAILABLE => Ok(Self::Available),
            STATUS_RESERVED => Ok(Self::Reserved),
            STATUS_SOLD => Ok(Self::Sold),
            STATUS_EXPIRED => Ok(Self::Expired),
            _ => Err(format!(
                "Invalid listing status '{s}'. Must be one of: {}",
                VALID_LISTING_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => STATUS_AVAILABLE,
            Self::Reserved => STATUS_RESERVED,
            Self::Sold => STATUS_SOLD,
            Self::Expired => STATUS_EXPIRED,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate that a listing quantity is non-negative and finite.
pub fn validate_quantity(quantity: f64) -> Result<(), String> {
    if !quantity.is_finite() {
        return Err("Quantity must be a finite number".to_string());
    }
    if quantity < 0.0 {
        return Err("Quantity must not be negative".to_string());
    }
    Ok(())
}

/// Validate that a unit price is non-negative.
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price per unit must not be negative".to_string());
    }
    Ok(())
}
