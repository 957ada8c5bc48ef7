//! Business logic services.

pub mod cart;

pub use cart::{CartError, CartService, CartUpdate};
