//! Cart domain types.
//!
//! A `Cart` is a one-per-user container of `CartItem` rows. Everything
//! derived from the item set (line totals, cart totals) is computed at read
//! time against live product data and never persisted, so a snapshot is
//! always consistent with current prices.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use larder_core::{CartId, CartItemId, ProductId, Quantity, UserId};

use crate::models::product::Product;

/// A user's cart (domain type).
///
/// Created lazily on first cart access; never deleted through the API, only
/// emptied.
#[derive(Debug, Clone, FromRow)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user. At most one cart exists per user.
    pub user_id: UserId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
    /// When the cart row was last updated.
    pub updated_at: DateTime<Utc>,
}

/// One line of a cart: a product reference and a quantity.
///
/// The `(cart_id, product_id)` pair is unique; adding a product twice merges
/// into the existing row instead of duplicating it.
#[derive(Debug, Clone, FromRow)]
pub struct CartItem {
    /// Unique item ID.
    pub id: CartItemId,
    /// Owning cart.
    pub cart_id: CartId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Number of units, always >= 1.
    pub quantity: Quantity,
    /// When the product was first added.
    pub created_at: DateTime<Utc>,
    /// When the quantity last changed.
    pub updated_at: DateTime<Utc>,
}

/// Product data embedded in a cart line response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartLineProduct {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    /// `false` flags a line whose product has been disabled since it was
    /// added. The line stays visible and priced; only new adds are blocked.
    pub is_available: bool,
}

/// A cart item joined with live product data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub product: CartLineProduct,
    pub quantity: Quantity,
    /// `product.price * quantity`, computed on read.
    pub line_total: Decimal,
}

impl CartLine {
    /// Join an item with its product, computing the line total.
    #[must_use]
    pub fn from_parts(item: &CartItem, product: &Product) -> Self {
        Self {
            id: item.id,
            product: CartLineProduct {
                id: product.id,
                name: product.name.clone(),
                slug: product.slug.clone(),
                price: product.price,
                is_available: product.is_available,
            },
            quantity: item.quantity,
            line_total: product.price * Decimal::from(item.quantity.get()),
        }
    }
}

/// The full cart view: all lines plus derived totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartSnapshot {
    pub id: CartId,
    pub items: Vec<CartLine>,
    /// Sum of quantities over all lines.
    pub total_items: i64,
    /// Sum of line totals over all lines, at current prices.
    pub total_price: Decimal,
}

impl CartSnapshot {
    /// Assemble a snapshot from a cart, its items, and a batch of product
    /// records keyed by ID.
    ///
    /// Disabled products are included and flagged (see [`CartLineProduct`]).
    ///
    /// # Errors
    ///
    /// Returns the offending `ProductId` if an item references a product
    /// that is absent from `products`. Foreign keys make this unreachable
    /// for well-formed data, so callers treat it as corruption.
    pub fn assemble(
        cart: &Cart,
        items: &[CartItem],
        products: &HashMap<ProductId, Product>,
    ) -> Result<Self, ProductId> {
        let mut lines = Vec::with_capacity(items.len());
        for item in items {
            let product = products.get(&item.product_id).ok_or(item.product_id)?;
            lines.push(CartLine::from_parts(item, product));
        }

        let total_items = lines.iter().map(|l| i64::from(l.quantity.get())).sum();
        let total_price = lines
            .iter()
            .fold(Decimal::ZERO, |acc, l| acc + l.line_total);

        Ok(Self {
            id: cart.id,
            items: lines,
            total_items,
            total_price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use larder_core::SubcategoryId;

    fn cart() -> Cart {
        Cart {
            id: CartId::new(1),
            user_id: UserId::new(10),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn product(id: i32, price: Decimal, is_available: bool) -> Product {
        Product {
            id: ProductId::new(id),
            subcategory_id: SubcategoryId::new(1),
            name: format!("product-{id}"),
            slug: format!("product-{id}"),
            price,
            description: None,
            is_available,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn item(id: i32, product_id: i32, quantity: i32) -> CartItem {
        CartItem {
            id: CartItemId::new(id),
            cart_id: CartId::new(1),
            product_id: ProductId::new(product_id),
            quantity: Quantity::new(quantity).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn index(products: Vec<Product>) -> HashMap<ProductId, Product> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn test_empty_cart_has_zero_totals() {
        let snapshot = CartSnapshot::assemble(&cart(), &[], &HashMap::new()).unwrap();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.total_items, 0);
        assert_eq!(snapshot.total_price, Decimal::ZERO);
    }

    #[test]
    fn test_single_line_totals() {
        // price 99.99, quantity 2 -> one line, total 199.98
        let products = index(vec![product(5, Decimal::new(9999, 2), true)]);
        let items = vec![item(1, 5, 2)];

        let snapshot = CartSnapshot::assemble(&cart(), &items, &products).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.total_price, Decimal::new(19998, 2));
        assert_eq!(snapshot.items[0].line_total, Decimal::new(19998, 2));
    }

    #[test]
    fn test_merged_line_totals() {
        // after merging a second add of 3 units: quantity 5, total 499.95
        let products = index(vec![product(5, Decimal::new(9999, 2), true)]);
        let items = vec![item(1, 5, 5)];

        let snapshot = CartSnapshot::assemble(&cart(), &items, &products).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.total_items, 5);
        assert_eq!(snapshot.total_price, Decimal::new(49995, 2));
    }

    #[test]
    fn test_totals_span_multiple_lines() {
        let products = index(vec![
            product(1, Decimal::new(450, 2), true),
            product(2, Decimal::new(325, 2), true),
        ]);
        let items = vec![item(1, 1, 2), item(2, 2, 1)];

        let snapshot = CartSnapshot::assemble(&cart(), &items, &products).unwrap();
        assert_eq!(snapshot.total_items, 3);
        // 2 * 4.50 + 1 * 3.25
        assert_eq!(snapshot.total_price, Decimal::new(1225, 2));
    }

    #[test]
    fn test_unavailable_product_is_flagged_and_counted() {
        let products = index(vec![
            product(1, Decimal::new(1000, 2), true),
            product(2, Decimal::new(500, 2), false),
        ]);
        let items = vec![item(1, 1, 1), item(2, 2, 2)];

        let snapshot = CartSnapshot::assemble(&cart(), &items, &products).unwrap();
        let flagged: Vec<_> = snapshot
            .items
            .iter()
            .filter(|l| !l.product.is_available)
            .collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].product.id, ProductId::new(2));
        // the disabled line still counts toward both totals
        assert_eq!(snapshot.total_items, 3);
        assert_eq!(snapshot.total_price, Decimal::new(2000, 2));
    }

    #[test]
    fn test_missing_product_is_an_error() {
        let items = vec![item(1, 99, 1)];
        let err = CartSnapshot::assemble(&cart(), &items, &HashMap::new()).unwrap_err();
        assert_eq!(err, ProductId::new(99));
    }

    #[test]
    fn test_snapshot_serializes_price_as_string() {
        let products = index(vec![product(5, Decimal::new(9999, 2), true)]);
        let items = vec![item(1, 5, 2)];
        let snapshot = CartSnapshot::assemble(&cart(), &items, &products).unwrap();

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["total_price"], serde_json::json!("199.98"));
        assert_eq!(json["items"][0]["quantity"], serde_json::json!(2));
        assert_eq!(json["items"][0]["line_total"], serde_json::json!("199.98"));
    }
}
