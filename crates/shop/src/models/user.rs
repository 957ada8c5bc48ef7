//! User domain types.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use larder_core::UserId;

/// A shop user (domain type).
///
/// Carries identity only. Token issuance happens out-of-band (see
/// `larder-cli seed`); the API merely resolves presented tokens back to a
/// `User`.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across users.
    pub username: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
