//! Cart service.
//!
//! Business logic over the cart and product repositories: get-or-create,
//! add/merge, update, remove, clear, and snapshot assembly with totals.
//!
//! Two policies are asymmetric on purpose and must stay that way:
//!
//! - *add* merges: adding a product already in the cart increments the
//!   existing line, and a non-positive quantity is rejected.
//! - *update* replaces: the given quantity overwrites the line, and a
//!   non-positive quantity removes the item instead of failing.

use std::collections::HashMap;

use sqlx::PgPool;
use thiserror::Error;

use larder_core::{CartItemId, ProductId, Quantity, UserId};

use crate::db::carts::{CartRepository, ItemUpdate};
use crate::db::products::ProductRepository;
use crate::db::RepositoryError;
use crate::models::cart::{CartLine, CartSnapshot};
use crate::models::product::Product;

/// Errors produced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity on add was zero or negative.
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    /// The product does not exist in the catalog.
    #[error("product not found")]
    ProductNotFound,

    /// The product exists but is disabled; it cannot be added.
    #[error("product is currently unavailable")]
    ProductUnavailable,

    /// The item does not exist in the caller's cart.
    #[error("cart item not found")]
    ItemNotFound,

    /// Underlying repository failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Outcome of [`CartService::update_item_quantity`].
#[derive(Debug)]
pub enum CartUpdate {
    /// The line's quantity was replaced.
    Updated(CartLine),
    /// The requested quantity was <= 0, so the line was removed.
    Removed,
}

/// Cart service.
///
/// Every operation starts from the caller's own cart (created lazily on
/// first use), so one user's requests can never read or mutate another
/// user's lines.
pub struct CartService<'a> {
    carts: CartRepository<'a>,
    products: ProductRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            carts: CartRepository::new(pool),
            products: ProductRepository::new(pool),
        }
    }

    /// Load the user's cart with live product data and computed totals.
    ///
    /// Lines whose product has been disabled stay in the snapshot, flagged
    /// via `product.is_available`, and still count toward the totals.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a query fails or an item
    /// references a product the catalog no longer has (data corruption;
    /// foreign keys prevent this for well-formed data).
    pub async fn view_cart(&self, user_id: UserId) -> Result<CartSnapshot, CartError> {
        let cart = self.carts.get_or_create(user_id).await?;
        let items = self.carts.list_items(cart.id).await?;

        let ids: Vec<ProductId> = items.iter().map(|item| item.product_id).collect();
        let products: HashMap<ProductId, Product> = self
            .products
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        CartSnapshot::assemble(&cart, &items, &products).map_err(|product_id| {
            CartError::Repository(RepositoryError::DataCorruption(format!(
                "cart item references missing product {product_id}"
            )))
        })
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// Adding a product that is already in the cart increments the existing
    /// line; it never overwrites or duplicates.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidQuantity` if `quantity < 1`.
    /// Returns `CartError::ProductNotFound` if the catalog cannot resolve
    /// the product. Returns `CartError::ProductUnavailable` if the product
    /// is disabled.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLine, CartError> {
        let quantity = Quantity::new(quantity).map_err(|_| CartError::InvalidQuantity)?;

        let product = self
            .products
            .get(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;
        if !product.is_available {
            return Err(CartError::ProductUnavailable);
        }

        let cart = self.carts.get_or_create(user_id).await?;
        let item = self
            .carts
            .upsert_item(cart.id, product_id, quantity.get())
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CartError::InvalidQuantity,
                // product (or cart) row vanished between the lookup and the insert
                RepositoryError::NotFound => CartError::ProductNotFound,
                other => CartError::Repository(other),
            })?;

        Ok(CartLine::from_parts(&item, &product))
    }

    /// Replace an item's quantity; a quantity <= 0 removes the item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the item is absent from the
    /// caller's cart. Another user's item is reported exactly the same way,
    /// so existence is never leaked.
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<CartUpdate, CartError> {
        let cart = self.carts.get_or_create(user_id).await?;

        match self.carts.set_item_quantity(cart.id, item_id, quantity).await {
            Ok(ItemUpdate::Removed) => Ok(CartUpdate::Removed),
            Ok(ItemUpdate::Updated(item)) => {
                let product = self.products.get(item.product_id).await?.ok_or_else(|| {
                    CartError::Repository(RepositoryError::DataCorruption(format!(
                        "cart item references missing product {}",
                        item.product_id
                    )))
                })?;
                Ok(CartUpdate::Updated(CartLine::from_parts(&item, &product)))
            }
            Err(RepositoryError::NotFound) => Err(CartError::ItemNotFound),
            Err(other) => Err(CartError::Repository(other)),
        }
    }

    /// Remove an item from the user's cart.
    ///
    /// Idempotent: removing an item that is already absent succeeds. An
    /// item in another user's cart counts as absent here and is untouched.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a query fails.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        item_id: CartItemId,
    ) -> Result<(), CartError> {
        let cart = self.carts.get_or_create(user_id).await?;
        self.carts.delete_item(cart.id, item_id).await?;
        Ok(())
    }

    /// Delete all items in the user's cart; the cart itself persists.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if a query fails.
    pub async fn clear_cart(&self, user_id: UserId) -> Result<u64, CartError> {
        let cart = self.carts.get_or_create(user_id).await?;
        let removed = self.carts.clear_items(cart.id).await?;
        Ok(removed)
    }
}
