//! Authentication middleware and extractors.
//!
//! Requests authenticate with `Authorization: Bearer <token>`. Tokens are
//! issued out-of-band (see `larder-cli seed`); the API stores only SHA-256
//! digests and resolves a presented token back to its user per request.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use sha2::{Digest, Sha256};

use larder_core::UserId;

use crate::db::tokens::TokenRepository;
use crate::state::AppState;

/// The authenticated user attached to a request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The user's ID.
    pub id: UserId,
    /// The user's login name.
    pub username: String,
}

/// Extractor that requires bearer-token authentication.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug)]
pub struct RequireAuth(pub CurrentUser);

/// Error returned when a request cannot be authenticated.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization: Bearer ..` header was present.
    MissingToken,
    /// The presented token resolved to no user.
    InvalidToken,
    /// Token lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "missing bearer token"),
            Self::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid token"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        (
            status,
            [(header::WWW_AUTHENTICATE, "Bearer")],
            Json(json!({ "error": message })),
        )
            .into_response()
    }
}

/// SHA-256 digest of a token, as stored in `shop.api_token`.
#[must_use]
pub fn token_digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Extract the bearer token from an `Authorization` header value.
fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthRejection::MissingToken)?;

        let digest = token_digest(token);
        let user = TokenRepository::new(state.pool())
            .find_user_by_token_hash(&digest)
            .await
            .map_err(|e| {
                tracing::error!("token lookup failed: {e}");
                AuthRejection::Internal
            })?
            .ok_or(AuthRejection::InvalidToken)?;

        Ok(Self(CurrentUser {
            id: user.id,
            username: user.username,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token("Bearer abc123"), Some("abc123"));
        assert_eq!(bearer_token("bearer abc123"), None);
        assert_eq!(bearer_token("Basic abc123"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[test]
    fn test_token_digest_is_sha256() {
        // SHA-256 of the empty string
        assert_eq!(
            token_digest("")[..4],
            [0xe3, 0xb0, 0xc4, 0x42]
        );
        // digests are stable per input and differ across inputs
        assert_eq!(token_digest("a"), token_digest("a"));
        assert_ne!(token_digest("a"), token_digest("b"));
    }

    #[test]
    fn test_rejection_status_codes() {
        assert_eq!(
            AuthRejection::MissingToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthRejection::Internal.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
