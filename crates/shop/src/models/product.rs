//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use larder_core::{ProductId, SubcategoryId};

/// A product row as the catalog stores it.
///
/// This is the snapshot the cart depends on: identity, current price, and
/// availability. Prices are read live from this record whenever a cart is
/// viewed, never copied into cart rows.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Owning subcategory.
    pub subcategory_id: SubcategoryId,
    /// Display name.
    pub name: String,
    /// URL slug, unique across all products.
    pub slug: String,
    /// Current unit price.
    pub price: Decimal,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Whether the product can currently be added to carts.
    pub is_available: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A product joined with its category and subcategory names, for browsing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductListing {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Name of the category reached through the subcategory.
    pub category: String,
    /// Name of the owning subcategory.
    pub subcategory: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub is_available: bool,
}
