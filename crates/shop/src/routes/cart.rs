//! Cart route handlers: view and clear.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::cart::CartSnapshot;
use crate::services::CartService;
use crate::state::AppState;

/// Response body for a cleared cart.
#[derive(Debug, Serialize)]
pub struct ClearCartResponse {
    pub message: String,
    pub removed_items: u64,
}

/// View the caller's cart with live product data and totals.
///
/// The cart is created lazily if this is the user's first access.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<CartSnapshot>> {
    let snapshot = CartService::new(state.pool()).view_cart(user.id).await?;
    Ok(Json(snapshot))
}

/// Delete every item in the caller's cart; the cart row persists for reuse.
#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn clear(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ClearCartResponse>> {
    let removed_items = CartService::new(state.pool()).clear_cart(user.id).await?;

    Ok(Json(ClearCartResponse {
        message: "cart cleared".to_owned(),
        removed_items,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_response_shape() {
        let body = ClearCartResponse {
            message: "cart cleared".to_owned(),
            removed_items: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "cart cleared", "removed_items": 3 })
        );
    }
}
