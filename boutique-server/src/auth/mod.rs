//! Admin authentication
//!
//! A single statically-configured basic-auth pair guards every
//! `/api/admin`-prefixed route. No accounts, no sessions, no tokens.

pub mod middleware;

pub use middleware::require_admin;
