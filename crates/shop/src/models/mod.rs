//! Domain types for the shop.
//!
//! These types represent validated domain objects separate from request and
//! response shapes, which live next to the route handlers.

pub mod cart;
pub mod category;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartLine, CartSnapshot};
pub use category::{Category, CategoryTree, Subcategory};
pub use product::{Product, ProductListing};
pub use user::User;
