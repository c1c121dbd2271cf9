//! Catalog domain logic
//!
//! - [`query`] - paged, searched product listing with total count
//! - [`related`] - related-products selection for the detail page

pub mod query;
pub mod related;

pub use query::{ADMIN_PAGE_SIZE, CatalogPage, CatalogRequest, PUBLIC_PAGE_SIZE, Scope};
pub use related::select_related;
