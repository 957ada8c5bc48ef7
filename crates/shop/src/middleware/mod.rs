//! HTTP middleware and extractors for the shop API.

pub mod auth;

pub use auth::{CurrentUser, RequireAuth};
