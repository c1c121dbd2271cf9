//! Data models
//!
//! Shared between boutique-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//! Wire types serialize as camelCase to match the storefront API.

pub mod cart;
pub mod product;
pub mod product_image;

// Re-exports
pub use cart::*;
pub use product::*;
pub use product_image::*;
