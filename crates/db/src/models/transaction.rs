//! Transaction ledger model and DTOs.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use t2t_core::types::{DbId, Timestamp};

/// A row from the `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub listing_id: DbId,
    pub buyer_id: DbId,
    pub seller_id: DbId,
    pub quantity: f64,
    pub total_amount: Decimal,
    /// Status string from the closed set in `t2t_core::transaction`.
    pub status: String,
    pub payment_reference: String,
    pub delivery_address: String,
    pub pickup_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a sale. Status always starts as `pending`;
/// `total_amount` is computed server-side from the listing price.
#[derive(Debug)]
pub struct CreateTransaction {
    pub listing_id: DbId,
    pub buyer_id: DbId,
    pub seller_id: DbId,
    pub quantity: f64,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub pickup_date: Option<Timestamp>,
}
