//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{ProductFilter, ProductRepository};
use crate::error::{AppError, Result};
use crate::models::product::ProductListing;
use crate::state::AppState;

/// Listing filter query parameters. `subcategory` wins when both are set.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// List products, optionally filtered by category or subcategory slug.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<ProductListing>>> {
    let filter = ProductFilter {
        category: query.category,
        subcategory: query.subcategory,
    };
    let products = ProductRepository::new(state.pool()).list(&filter).await?;

    Ok(Json(products))
}

/// Get one product by slug.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductListing>> {
    let product = ProductRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("product".to_owned()))?;

    Ok(Json(product))
}
