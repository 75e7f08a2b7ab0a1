//! Marketplace role names and the closed [`Role`] type.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20250301000001_create_users.sql`.

use serde::{Deserialize, Serialize};

/// Posts waste material for sale.
pub const ROLE_WASTE_GENERATOR: &str = "waste_generator";

/// Buys/recycles posted material.
pub const ROLE_BUYER: &str = "buyer";

/// Delivery personnel.
pub const ROLE_DELIVERY: &str = "delivery";

/// Platform administrator.
pub const ROLE_ADMIN: &str = "admin";

/// All valid role strings.
pub const VALID_ROLES: &[&str] = &[ROLE_WASTE_GENERATOR, ROLE_BUYER, ROLE_DELIVERY, ROLE_ADMIN];

/// Closed classification of a user's marketplace capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    WasteGenerator,
    Buyer,
    Delivery,
    Admin,
}

impl Role {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            ROLE_WASTE_GENERATOR => Ok(Self::WasteGenerator),
            ROLE_BUYER => Ok(Self::Buyer),
            ROLE_DELIVERY => Ok(Self::Delivery),
            ROLE_ADMIN => Ok(Self::Admin),
            _ => Err(format!(
                "Invalid role '{s}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WasteGenerator => ROLE_WASTE_GENERATOR,
            Self::Buyer => ROLE_BUYER,
            Self::Delivery => ROLE_DELIVERY,
            Self::Admin => ROLE_ADMIN,
        }
    }
}
