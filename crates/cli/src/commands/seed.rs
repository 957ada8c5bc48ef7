//! Demo data seeding command.
//!
//! # Usage
//!
//! ```bash
//! larder-cli seed
//! ```
//!
//! Inserts a small demo catalog and two demo users, then mints and prints
//! one fresh API token per user. Catalog and user inserts are idempotent
//! (`ON CONFLICT DO NOTHING` / fetch-on-conflict); tokens are new on every
//! run. Only SHA-256 digests of tokens reach the database.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rust_decimal::Decimal;
use sqlx::PgPool;

use larder_shop::db::{RepositoryError, TokenRepository, UserRepository};
use larder_shop::middleware::auth::token_digest;

use super::migrate::{MigrateError, database_url};

/// Demo categories: (name, slug).
const CATEGORIES: &[(&str, &str)] = &[("Pantry", "pantry"), ("Kitchen", "kitchen")];

/// Demo subcategories: (name, slug, category slug).
const SUBCATEGORIES: &[(&str, &str, &str)] = &[
    ("Preserves", "preserves", "pantry"),
    ("Oils & Vinegars", "oils-and-vinegars", "pantry"),
    ("Storage", "storage", "kitchen"),
];

/// Demo products: (name, slug, price in cents, available, subcategory slug).
const PRODUCTS: &[(&str, &str, i64, bool, &str)] = &[
    ("Strawberry Jam", "strawberry-jam", 450, true, "preserves"),
    ("Orange Marmalade", "orange-marmalade", 325, true, "preserves"),
    ("Quince Paste", "quince-paste", 780, false, "preserves"),
    ("White Truffle Oil", "white-truffle-oil", 9999, true, "oils-and-vinegars"),
    ("Mason Jar Set", "mason-jar-set", 1800, true, "storage"),
];

/// Demo users to create (one token is printed per user).
const USERS: &[&str] = &["demo", "demo2"];

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Connect(#[from] MigrateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Seed the database with demo data.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let pool = PgPool::connect(&database_url()?).await?;

    seed_catalog(&pool).await?;
    tracing::info!("Catalog seeded");

    for username in USERS {
        let token = seed_user(&pool, username).await?;
        #[allow(clippy::print_stdout)]
        {
            println!("{username}: {token}");
        }
    }

    Ok(())
}

async fn seed_catalog(pool: &PgPool) -> Result<(), SeedError> {
    for (name, slug) in CATEGORIES {
        sqlx::query(
            r"
            INSERT INTO shop.category (name, slug)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(name)
        .bind(slug)
        .execute(pool)
        .await?;
    }

    for (name, slug, category_slug) in SUBCATEGORIES {
        sqlx::query(
            r"
            INSERT INTO shop.subcategory (category_id, name, slug)
            SELECT id, $1, $2 FROM shop.category WHERE slug = $3
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(category_slug)
        .execute(pool)
        .await?;
    }

    for (name, slug, cents, is_available, subcategory_slug) in PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO shop.product (subcategory_id, name, slug, price, is_available)
            SELECT id, $1, $2, $3, $4 FROM shop.subcategory WHERE slug = $5
            ON CONFLICT (slug) DO NOTHING
            ",
        )
        .bind(name)
        .bind(slug)
        .bind(Decimal::new(*cents, 2))
        .bind(is_available)
        .bind(subcategory_slug)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Ensure the user exists and mint a fresh API token for them.
async fn seed_user(pool: &PgPool, username: &str) -> Result<String, SeedError> {
    let users = UserRepository::new(pool);

    let user = match users.create(username).await {
        Ok(user) => user,
        Err(RepositoryError::Conflict(_)) => users
            .get_by_username(username)
            .await?
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("user {username} vanished after conflict"))
            })?,
        Err(e) => return Err(e.into()),
    };

    let token = mint_token();
    TokenRepository::new(pool)
        .insert(user.id, &token_digest(&token))
        .await?;

    Ok(token)
}

/// Generate a random URL-safe token (32 bytes of entropy).
fn mint_token() -> String {
    let mut bytes = [0_u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_tokens_are_unique_and_urlsafe() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
        // 32 bytes -> 43 base64url characters, no padding
        assert_eq!(a.len(), 43);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_seed_data_is_consistent() {
        // every subcategory references a seeded category
        for (_, _, category_slug) in SUBCATEGORIES {
            assert!(CATEGORIES.iter().any(|(_, slug)| slug == category_slug));
        }
        // every product references a seeded subcategory and has a positive price
        for (_, _, cents, _, subcategory_slug) in PRODUCTS {
            assert!(SUBCATEGORIES.iter().any(|(_, slug, _)| slug == subcategory_slug));
            assert!(*cents > 0);
        }
    }
}
