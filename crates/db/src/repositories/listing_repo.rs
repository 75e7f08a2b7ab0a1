//! Repositories for the `waste_listings` and `waste_images` tables.

use sqlx::PgPool;
use t2t_core::listing::STATUS_AVAILABLE;
use t2t_core::types::DbId;

use crate::models::listing::{
    CreateListing, CreateWasteImage, ListingFilter, ListingStats, WasteImage, WasteListing,
};

/// Column list for `waste_listings` queries.
const COLUMNS: &str = "id, title, description, waste_type, quantity, unit, location, \
                        latitude, longitude, price_per_unit, status, user_id, \
                        created_at, updated_at";

/// Column list for `waste_images` queries.
const IMAGE_COLUMNS: &str = "id, listing_id, image_path, caption, created_at";

/// Provides CRUD operations for waste listings.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new listing for a user, returning the created row.
    ///
    /// New listings always start with status `available`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateListing,
    ) -> Result<WasteListing, sqlx::Error> {
        let query = format!(
            "INSERT INTO waste_listings (title, description, waste_type, quantity, unit, \
                                         location, latitude, longitude, price_per_unit, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WasteListing>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.waste_type.as_str())
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.price_per_unit)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a listing by ID, regardless of status.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WasteListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waste_listings WHERE id = $1");
        sqlx::query_as::<_, WasteListing>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several listings by ID in one round trip.
    pub async fn list_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<WasteListing>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waste_listings WHERE id = ANY($1)");
        sqlx::query_as::<_, WasteListing>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List available listings matching the given filters, newest first.
    ///
    /// Filters combine conjunctively; an empty filter returns every
    /// available listing.
    pub async fn list_available(
        pool: &PgPool,
        filter: &ListingFilter,
    ) -> Result<Vec<WasteListing>, sqlx::Error> {
        let (where_clause, bind_values) = build_listing_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM waste_listings {where_clause} \
             ORDER BY created_at DESC, id DESC"
        );
        let mut q = sqlx::query_as::<_, WasteListing>(&query);
        for val in &bind_values {
            match val {
                BindValue::Text(v) => q = q.bind(v.as_str()),
                BindValue::Double(v) => q = q.bind(*v),
            }
        }
        q.fetch_all(pool).await
    }

    /// List a user's own listings, any status, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WasteListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waste_listings \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, WasteListing>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Aggregate listing counts for a user's dashboard.
    pub async fn stats_for_user(pool: &PgPool, user_id: DbId) -> Result<ListingStats, sqlx::Error> {
        sqlx::query_as::<_, ListingStats>(
            "SELECT \
                COUNT(*) AS total_listings, \
                COUNT(*) FILTER (WHERE status = 'available') AS available_listings \
             FROM waste_listings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}

/// Provides CRUD operations for listing images.
pub struct WasteImageRepo;

impl WasteImageRepo {
    /// Insert an image record for a listing, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWasteImage,
    ) -> Result<WasteImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO waste_images (listing_id, image_path, caption)
             VALUES ($1, $2, $3)
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, WasteImage>(&query)
            .bind(input.listing_id)
            .bind(&input.image_path)
            .bind(&input.caption)
            .fetch_one(pool)
            .await
    }

    /// List images for a single listing, oldest first.
    pub async fn list_for_listing(
        pool: &PgPool,
        listing_id: DbId,
    ) -> Result<Vec<WasteImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM waste_images \
             WHERE listing_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, WasteImage>(&query)
            .bind(listing_id)
            .fetch_all(pool)
            .await
    }

    /// List images for multiple listings in one round trip.
    pub async fn list_for_listings(
        pool: &PgPool,
        listing_ids: &[DbId],
    ) -> Result<Vec<WasteImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM waste_images \
             WHERE listing_id = ANY($1) \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, WasteImage>(&query)
            .bind(listing_ids)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Filter building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built listing queries.
enum BindValue {
    Text(String),
    Double(f64),
}

/// Build a WHERE clause and bind values from `ListingFilter` parameters.
///
/// The clause always pins status to `available`; active filters are ANDed on.
fn build_listing_filter(filter: &ListingFilter) -> (String, Vec<BindValue>) {
    let mut conditions = vec![format!("status = '{STATUS_AVAILABLE}'")];
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(ref waste_type) = filter.waste_type {
        conditions.push(format!("waste_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(waste_type.clone()));
    }

    if let Some(ref location) = filter.location {
        conditions.push(format!("location ILIKE ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{location}%")));
    }

    if let Some(min_quantity) = filter.min_quantity {
        conditions.push(format!("quantity >= ${bind_idx}"));
        bind_values.push(BindValue::Double(min_quantity));
    }

    (format!("WHERE {}", conditions.join(" AND ")), bind_values)
}
