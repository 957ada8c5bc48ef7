//! HTTP route handlers for the shop API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (verifies database)
//!
//! # Catalog (public)
//! GET  /api/v1/categories           - Categories with subcategories
//! GET  /api/v1/categories/{slug}    - Category detail
//! GET  /api/v1/products             - Product listing (?category= / ?subcategory=)
//! GET  /api/v1/products/{slug}      - Product detail
//!
//! # Cart (bearer token required)
//! GET    /api/v1/cart               - View cart with totals
//! DELETE /api/v1/cart               - Clear cart (cart row persists)
//! POST   /api/v1/cart/items         - Add product (merges into existing line)
//! PATCH  /api/v1/cart/items/{id}    - Replace quantity (<= 0 removes)
//! DELETE /api/v1/cart/items/{id}    - Remove item (idempotent)
//! ```

pub mod cart;
pub mod cart_items;
pub mod categories;
pub mod products;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(categories::index))
        .route("/categories/{slug}", get(categories::show))
        .route("/products", get(products::index))
        .route("/products/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show).delete(cart::clear))
        .route("/items", post(cart_items::create))
        .route(
            "/items/{id}",
            patch(cart_items::update).delete(cart_items::remove),
        )
}

/// Create all routes for the shop API.
pub fn routes() -> Router<AppState> {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .merge(catalog_routes())
            .nest("/cart", cart_routes()),
    )
}
