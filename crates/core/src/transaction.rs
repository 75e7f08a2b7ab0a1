//! Transaction status constants and validation helpers.
//!
//! The status set must match the CHECK constraint on `transactions.status`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

pub const TX_PENDING: &str = "pending";
pub const TX_CONFIRMED: &str = "confirmed";
pub const TX_COMPLETED: &str = "completed";
pub const TX_CANCELLED: &str = "cancelled";

/// All valid transaction status strings.
pub const VALID_TX_STATUSES: &[&str] = &[TX_PENDING, TX_CONFIRMED, TX_COMPLETED, TX_CANCELLED];

/// Progression state of a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl TransactionStatus {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TX_PENDING => Ok(Self::Pending),
            TX_CONFIRMED => Ok(Self::Confirmed),
            TX_COMPLETED => Ok(Self::Completed),
            TX_CANCELLED => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid transaction status '{s}'. Must be one of: {}",
                VALID_TX_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => TX_PENDING,
            Self::Confirmed => TX_CONFIRMED,
            Self::Completed => TX_COMPLETED,
            Self::Cancelled => TX_CANCELLED,
        }
    }
}

/// Validate that a sale does not pair a user with themselves.
pub fn validate_transaction_parties(buyer_id: DbId, seller_id: DbId) -> Result<(), String> {
    if buyer_id == seller_id {
        return Err("Buyer and seller must be different users".to_string());
    }
    Ok(())
}

/// Compute the total amount for a sale, rounded to 2 decimal places.
///
/// Returns `Err` when the quantity cannot be represented as a decimal
/// (NaN/infinite input).
pub fn compute_total_amount(price_per_unit: Decimal, quantity: f64) -> Result<Decimal, String> {
    let qty = Decimal::from_f64(quantity)
        .ok_or_else(|| "Quantity is not representable as a decimal".to_string())?;
    Ok((price_per_unit * qty).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tx_status_round_trip() {
        for s in VALID_TX_STATUSES {
            let st = TransactionStatus::from_str_value(s).expect("valid status must parse");
            assert_eq!(st.as_str(), *s);
        }
    }

    #[test]
    fn test_buyer_cannot_be_seller() {
        assert!(validate_transaction_parties(1, 2).is_ok());
        let err = validate_transaction_parties(7, 7).unwrap_err();
        assert!(err.contains("different users"));
    }

    #[test]
    fn test_total_amount_rounds_to_two_places() {
        // 3.333 * 2.5 kg = 8.3325 -> 8.33
        let price = Decimal::new(3333, 3);
        let total = compute_total_amount(price, 2.5).unwrap();
        assert_eq!(total, Decimal::new(833, 2));
    }

    #[test]
    fn test_total_amount_rejects_nan_quantity() {
        assert!(compute_total_amount(Decimal::ONE, f64::NAN).is_err());
    }
}
