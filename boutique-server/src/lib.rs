//! Boutique Storefront Server
//!
//! HTTP backend for a small saree/apparel boutique: public catalog with
//! search and pagination, product detail with gallery and related-products
//! recommendation, WhatsApp checkout handoff, and a basic-auth-protected
//! admin surface for product/image CRUD.
//!
//! # Module structure
//!
//! ```text
//! boutique-server/src/
//! ├── core/          # Config, state, server
//! ├── auth/          # Admin basic-auth gate
//! ├── catalog/       # Listing query + related-items selection
//! ├── checkout/      # Cart totals and WhatsApp link building
//! ├── services/      # Blob store for image binaries
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Environment setup: dotenv plus logging, driven by `LOG_LEVEL`/`LOG_DIR`.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(level.as_deref(), log_dir.as_deref());
}
