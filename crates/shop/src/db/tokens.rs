//! API token repository.
//!
//! Only SHA-256 digests of tokens are stored; the plaintext token exists
//! solely in the response of `larder-cli seed` (issuance is out-of-band).

use sqlx::PgPool;

use larder_core::UserId;

use super::RepositoryError;
use crate::models::user::User;

/// Repository for API token database operations.
pub struct TokenRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TokenRepository<'a> {
    /// Create a new token repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Resolve a token digest to its owning user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_user_by_token_hash(
        &self,
        token_hash: &[u8],
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT u.id, u.username, u.created_at, u.updated_at
            FROM shop.api_token t
            JOIN shop.shop_user u ON u.id = t.user_id
            WHERE t.token_hash = $1
            ",
        )
        .bind(token_hash)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Store a token digest for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the digest already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        user_id: UserId,
        token_hash: &[u8],
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO shop.api_token (user_id, token_hash)
            VALUES ($1, $2)
            ",
        )
        .bind(user_id)
        .bind(token_hash)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("token already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }
}
