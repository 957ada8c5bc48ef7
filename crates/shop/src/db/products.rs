//! Product repository: the catalog store the cart depends on.

use sqlx::PgPool;

use larder_core::ProductId;

use super::RepositoryError;
use crate::models::product::{Product, ProductListing};

const LISTING_SELECT: &str = r"
    SELECT p.id, p.name, p.slug,
           c.name AS category, s.name AS subcategory,
           p.price, p.description, p.is_available
    FROM shop.product p
    JOIN shop.subcategory s ON s.id = p.subcategory_id
    JOIN shop.category c ON c.id = s.category_id
";

/// Filter for product listings. `subcategory` wins when both are set.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by its ID: the price + availability snapshot.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            r"
            SELECT id, subcategory_id, name, slug, price, description,
                   is_available, created_at, updated_at
            FROM shop.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Fetch a batch of products by ID in one query.
    ///
    /// Used when assembling cart views so an N-line cart costs one product
    /// lookup, not N.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let raw: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();

        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, subcategory_id, name, slug, price, description,
                   is_available, created_at, updated_at
            FROM shop.product
            WHERE id = ANY($1)
            ",
        )
        .bind(raw)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a product listing (with category names) by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<ProductListing>, RepositoryError> {
        let sql = format!("{LISTING_SELECT} WHERE p.slug = $1");
        let listing = sqlx::query_as::<_, ProductListing>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(listing)
    }

    /// List products, optionally filtered by category or subcategory slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<ProductListing>, RepositoryError> {
        let listings = match (filter.subcategory.as_deref(), filter.category.as_deref()) {
            (Some(subcategory), _) => {
                let sql = format!("{LISTING_SELECT} WHERE s.slug = $1 ORDER BY p.name");
                sqlx::query_as::<_, ProductListing>(&sql)
                    .bind(subcategory)
                    .fetch_all(self.pool)
                    .await?
            }
            (None, Some(category)) => {
                let sql = format!("{LISTING_SELECT} WHERE c.slug = $1 ORDER BY p.name");
                sqlx::query_as::<_, ProductListing>(&sql)
                    .bind(category)
                    .fetch_all(self.pool)
                    .await?
            }
            (None, None) => {
                let sql = format!("{LISTING_SELECT} ORDER BY p.name");
                sqlx::query_as::<_, ProductListing>(&sql)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(listings)
    }
}
