//! Repository for the `transactions` table.

use sqlx::PgPool;
use t2t_core::listing::{STATUS_AVAILABLE, STATUS_RESERVED};
use t2t_core::types::DbId;

use crate::models::notification::CreateNotification;
use crate::models::transaction::{CreateTransaction, Transaction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, listing_id, buyer_id, seller_id, quantity, total_amount, \
                        status, payment_reference, delivery_address, pickup_date, \
                        created_at, updated_at";

/// Provides CRUD operations for transactions.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a sale atomically: reserve the listing, insert the transaction,
    /// and write the seller's notification, all in one database transaction.
    ///
    /// Returns `None` if the listing was no longer `available` (lost race or
    /// already taken), in which case nothing is written.
    pub async fn create_with_notification(
        pool: &PgPool,
        input: &CreateTransaction,
        notification: &CreateNotification,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Reserve the listing; the status guard makes the check-and-set atomic.
        let reserved = sqlx::query(
            "UPDATE waste_listings SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND status = $3",
        )
        .bind(input.listing_id)
        .bind(STATUS_RESERVED)
        .bind(STATUS_AVAILABLE)
        .execute(&mut *tx)
        .await?;
        if reserved.rows_affected() == 0 {
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO transactions (listing_id, buyer_id, seller_id, quantity, \
                                       total_amount, delivery_address, pickup_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let transaction = sqlx::query_as::<_, Transaction>(&query)
            .bind(input.listing_id)
            .bind(input.buyer_id)
            .bind(input.seller_id)
            .bind(input.quantity)
            .bind(input.total_amount)
            .bind(&input.delivery_address)
            .bind(input.pickup_date)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO notifications (user_id, kind, title, message, priority) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(notification.user_id)
        .bind(&notification.kind)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.priority)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(transaction))
    }

    /// Find a transaction by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transactions where the user is buyer or seller, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             WHERE buyer_id = $1 OR seller_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Count transactions where the user is buyer or seller.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM transactions WHERE buyer_id = $1 OR seller_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
