//! Shared helpers for Larder integration tests.
//!
//! These tests exercise a running stack end-to-end. They require:
//! - A running `PostgreSQL` database, migrated (`larder-cli migrate`)
//! - Demo data seeded (`larder-cli seed`)
//! - The shop server running (`cargo run -p larder-shop`)
//! - `SHOP_API_TOKEN` / `SHOP_API_TOKEN_B` set to the two tokens `seed`
//!   printed (users `demo` and `demo2`)
//!
//! The cart tests mutate the demo users' carts, so run them single-threaded:
//!
//! ```bash
//! cargo test -p larder-integration-tests -- --ignored --test-threads=1
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use reqwest::Client;

/// Base URL for the shop API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string())
}

/// Bearer token for the primary test user (`demo`).
#[must_use]
pub fn api_token() -> String {
    std::env::var("SHOP_API_TOKEN").expect("SHOP_API_TOKEN must be set (see larder-cli seed)")
}

/// Bearer token for the secondary test user (`demo2`).
#[must_use]
pub fn api_token_b() -> String {
    std::env::var("SHOP_API_TOKEN_B").expect("SHOP_API_TOKEN_B must be set (see larder-cli seed)")
}

/// Create an HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// `Authorization` header value for a bearer token.
#[must_use]
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
