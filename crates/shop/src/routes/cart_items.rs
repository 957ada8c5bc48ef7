//! Cart item route handlers: add, update quantity, remove.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use larder_core::{CartItemId, ProductId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::cart::CartLine;
use crate::services::{CartService, CartUpdate};
use crate::state::AppState;

/// Request body for adding a product to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    /// Defaults to 1 when omitted. Must be >= 1; zero and negative values
    /// are rejected on this path (removal happens through update/delete).
    pub quantity: Option<i32>,
}

/// Request body for replacing an item's quantity.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    /// A value <= 0 removes the item instead of failing.
    pub quantity: i32,
}

/// Response body for a quantity update.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdateItemResponse {
    /// The updated line.
    Updated(CartLine),
    /// The item was removed because the requested quantity was <= 0.
    Removed { removed: bool, id: CartItemId },
}

/// Add a product to the caller's cart.
///
/// Adding a product that is already in the cart increments the existing
/// line rather than creating a second one.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AddItemRequest>,
) -> Result<impl IntoResponse> {
    let quantity = req.quantity.unwrap_or(1);
    let line = CartService::new(state.pool())
        .add_item(user.id, req.product_id, quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(line)))
}

/// Replace an item's quantity; a quantity <= 0 removes the item.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<CartItemId>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<UpdateItemResponse>> {
    let update = CartService::new(state.pool())
        .update_item_quantity(user.id, item_id, req.quantity)
        .await?;

    let response = match update {
        CartUpdate::Updated(line) => UpdateItemResponse::Updated(line),
        CartUpdate::Removed => UpdateItemResponse::Removed {
            removed: true,
            id: item_id,
        },
    };

    Ok(Json(response))
}

/// Remove an item from the caller's cart. Idempotent: removing an item
/// that is already absent still returns 204.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(item_id): Path<CartItemId>,
) -> Result<StatusCode> {
    CartService::new(state.pool())
        .remove_item(user.id, item_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_request_quantity_defaults() {
        let req: AddItemRequest = serde_json::from_str(r#"{"product_id": 5}"#).unwrap();
        assert_eq!(req.product_id, ProductId::new(5));
        assert_eq!(req.quantity, None);

        let req: AddItemRequest =
            serde_json::from_str(r#"{"product_id": 5, "quantity": 3}"#).unwrap();
        assert_eq!(req.quantity, Some(3));
    }

    #[test]
    fn test_add_request_rejects_fractional_quantity() {
        assert!(serde_json::from_str::<AddItemRequest>(r#"{"product_id": 5, "quantity": 1.5}"#)
            .is_err());
    }

    #[test]
    fn test_update_request_accepts_zero_and_negative() {
        // removal-by-update is expressed through the value, not a separate field
        let req: UpdateItemRequest = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert_eq!(req.quantity, 0);

        let req: UpdateItemRequest = serde_json::from_str(r#"{"quantity": -2}"#).unwrap();
        assert_eq!(req.quantity, -2);
    }

    #[test]
    fn test_removed_response_shape() {
        let response = UpdateItemResponse::Removed {
            removed: true,
            id: CartItemId::new(9),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "removed": true, "id": 9 }));
    }
}
