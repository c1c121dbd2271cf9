//! Shared types for the boutique storefront
//!
//! Data models and small utilities used by the server and API clients.
//! DB row derives are feature-gated behind `db` so clients can depend on
//! the models without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
