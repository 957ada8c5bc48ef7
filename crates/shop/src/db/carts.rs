//! Cart repository for database operations.
//!
//! All writes to a cart's item set are single atomic statements, so
//! overlapping requests for the same user (e.g. a double-submitted "add to
//! cart") cannot lose updates or duplicate rows. The two uniqueness
//! invariants live in the schema: `UNIQUE (user_id)` on `cart` and
//! `UNIQUE (cart_id, product_id)` on `cart_item`.

use sqlx::PgPool;

use larder_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::{Cart, CartItem};

/// Outcome of [`CartRepository::set_item_quantity`].
#[derive(Debug)]
pub enum ItemUpdate {
    /// The quantity was overwritten.
    Updated(CartItem),
    /// The requested quantity was <= 0, so the item was deleted.
    Removed,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return the user's cart, creating it if this is the first access.
    ///
    /// Safe under concurrent first access: the insert is `ON CONFLICT DO
    /// NOTHING`, and whichever request loses the race fetches the winner's
    /// row instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the retry fetch finds no cart
    /// either (creation raced with an out-of-band deletion).
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let inserted = sqlx::query_as::<_, Cart>(
            r"
            INSERT INTO shop.cart (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING id, user_id, created_at, updated_at
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        if let Some(cart) = inserted {
            return Ok(cart);
        }

        sqlx::query_as::<_, Cart>(
            r"
            SELECT id, user_id, created_at, updated_at
            FROM shop.cart
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| {
            RepositoryError::Conflict("cart creation raced with a deletion".to_owned())
        })
    }

    /// List a cart's items, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_items(&self, cart_id: CartId) -> Result<Vec<CartItem>, RepositoryError> {
        let items = sqlx::query_as::<_, CartItem>(
            r"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM shop.cart_item
            WHERE cart_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }

    /// Look up an item by its unique `(cart, product)` pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r"
            SELECT id, cart_id, product_id, quantity, created_at, updated_at
            FROM shop.cart_item
            WHERE cart_id = $1 AND product_id = $2
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Insert a new line or add `quantity_delta` to an existing one.
    ///
    /// The increment happens inside a single `INSERT .. ON CONFLICT DO
    /// UPDATE` statement, so concurrent adds of the same product both land.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the resulting quantity would
    /// violate `CHECK (quantity >= 1)`.
    /// Returns `RepositoryError::NotFound` if the cart or product row
    /// vanished under the insert (foreign key violation).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert_item(
        &self,
        cart_id: CartId,
        product_id: ProductId,
        quantity_delta: i32,
    ) -> Result<CartItem, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            r"
            INSERT INTO shop.cart_item (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_item.quantity + EXCLUDED.quantity,
                          updated_at = now()
            RETURNING id, cart_id, product_id, quantity, created_at, updated_at
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity_delta)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_check_violation() {
                    return RepositoryError::Conflict(
                        "resulting quantity would fall below 1".to_owned(),
                    );
                }
                if db_err.is_foreign_key_violation() {
                    return RepositoryError::NotFound;
                }
            }
            RepositoryError::Database(e)
        })
    }

    /// Overwrite an item's quantity, or delete it when `quantity <= 0`.
    ///
    /// The update is scoped to `cart_id`, so an item belonging to another
    /// cart is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item is absent from this
    /// cart. Returns `RepositoryError::Database` if the query fails.
    pub async fn set_item_quantity(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<ItemUpdate, RepositoryError> {
        if quantity <= 0 {
            return if self.delete_item(cart_id, item_id).await? {
                Ok(ItemUpdate::Removed)
            } else {
                Err(RepositoryError::NotFound)
            };
        }

        let updated = sqlx::query_as::<_, CartItem>(
            r"
            UPDATE shop.cart_item
            SET quantity = $3, updated_at = now()
            WHERE id = $1 AND cart_id = $2
            RETURNING id, cart_id, product_id, quantity, created_at, updated_at
            ",
        )
        .bind(item_id)
        .bind(cart_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        updated.map(ItemUpdate::Updated).ok_or(RepositoryError::NotFound)
    }

    /// Delete an item from a cart.
    ///
    /// # Returns
    ///
    /// Returns `true` if the item was deleted, `false` if it didn't exist
    /// in this cart (idempotent).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_item(
        &self,
        cart_id: CartId,
        item_id: CartItemId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item
            WHERE id = $1 AND cart_id = $2
            ",
        )
        .bind(item_id)
        .bind(cart_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete all items in a cart; the cart row itself persists.
    ///
    /// # Returns
    ///
    /// Returns the number of deleted items (idempotent; 0 for an empty cart).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear_items(&self, cart_id: CartId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart_item
            WHERE cart_id = $1
            ",
        )
        .bind(cart_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
