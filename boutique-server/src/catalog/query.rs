//! Catalog listing query
//!
//! One page of the product list matching an optional search term, plus the
//! total count computed against the same predicate. Page sizes are fixed
//! per scope, never client-controlled.

use serde::Serialize;
use shared::models::Product;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, product};

/// Storefront listing page size
pub const PUBLIC_PAGE_SIZE: i64 = 12;
/// Admin listing page size
pub const ADMIN_PAGE_SIZE: i64 = 10;

/// Listing scope: the public catalog only ever sees published products.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Public,
    Admin,
}

impl Scope {
    pub fn page_size(self) -> i64 {
        match self {
            Scope::Public => PUBLIC_PAGE_SIZE,
            Scope::Admin => ADMIN_PAGE_SIZE,
        }
    }

    fn published_only(self) -> bool {
        matches!(self, Scope::Public)
    }
}

/// Normalized listing request
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub scope: Scope,
    pub page: i64,
    pub search: Option<String>,
}

impl CatalogRequest {
    /// Build a request, clamping the page to 1 and dropping empty or
    /// whitespace-only search terms.
    pub fn new(scope: Scope, page: i64, search: Option<String>) -> Self {
        let search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            scope,
            page: page.max(1),
            search,
        }
    }
}

/// One listing page plus paging metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total_count: i64,
}

/// `max(1, ceil(total_count / page_size))` — an empty catalog still has one
/// (empty) page.
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    ((total_count + page_size - 1) / page_size).max(1)
}

/// Run the listing query.
///
/// Count and slice run against the same predicate, so `total_pages` can
/// never disagree with the returned rows. A page past the end yields an
/// empty product list with accurate metadata, not an error.
pub async fn fetch_page(pool: &SqlitePool, req: &CatalogRequest) -> RepoResult<CatalogPage> {
    let page_size = req.scope.page_size();
    let search = req.search.as_deref();

    let total_count = product::count_matching(pool, req.scope.published_only(), search).await?;
    let offset = (req.page - 1) * page_size;
    let products =
        product::find_page(pool, req.scope.published_only(), search, page_size, offset).await?;

    Ok(CatalogPage {
        products,
        total_pages: total_pages(total_count, page_size),
        current_page: req.page,
        total_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product::tests::{seed_product, test_pool};

    #[test]
    fn total_pages_rounds_up_and_never_drops_below_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(24, 12), 2);
        assert_eq!(total_pages(25, 12), 3);
    }

    #[test]
    fn request_clamps_page_and_normalizes_search() {
        let req = CatalogRequest::new(Scope::Public, 0, Some("  ".into()));
        assert_eq!(req.page, 1);
        assert!(req.search.is_none());

        let req = CatalogRequest::new(Scope::Public, -3, Some(" silk ".into()));
        assert_eq!(req.page, 1);
        assert_eq!(req.search.as_deref(), Some("silk"));
    }

    #[tokio::test]
    async fn pages_below_one_behave_like_page_one() {
        let pool = test_pool().await;
        for id in 1..=15 {
            seed_product(&pool, id, &format!("P{id}"), None, None, true).await;
        }

        let clamped = fetch_page(&pool, &CatalogRequest::new(Scope::Public, -5, None))
            .await
            .unwrap();
        let first = fetch_page(&pool, &CatalogRequest::new(Scope::Public, 1, None))
            .await
            .unwrap();

        let ids = |page: &CatalogPage| page.products.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&clamped), ids(&first));
        assert_eq!(clamped.current_page, 1);
    }

    #[tokio::test]
    async fn page_past_the_end_keeps_accurate_metadata() {
        let pool = test_pool().await;
        for id in 1..=25 {
            seed_product(&pool, id, &format!("P{id}"), None, None, true).await;
        }

        let page = fetch_page(&pool, &CatalogRequest::new(Scope::Admin, 9, None))
            .await
            .unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.current_page, 9);
    }

    #[tokio::test]
    async fn admin_scope_pages_by_ten_and_sees_unpublished() {
        let pool = test_pool().await;
        for id in 1..=12 {
            seed_product(&pool, id, &format!("P{id}"), None, None, id % 2 == 0).await;
        }

        let admin = fetch_page(&pool, &CatalogRequest::new(Scope::Admin, 1, None))
            .await
            .unwrap();
        assert_eq!(admin.products.len(), 10);
        assert_eq!(admin.total_count, 12);
        assert_eq!(admin.total_pages, 2);

        let public = fetch_page(&pool, &CatalogRequest::new(Scope::Public, 1, None))
            .await
            .unwrap();
        assert_eq!(public.total_count, 6);
        assert!(public.products.iter().all(|p| p.published));
    }

    #[tokio::test]
    async fn serializes_with_the_wire_field_names() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Saree", None, None, true).await;

        let page = fetch_page(&pool, &CatalogRequest::new(Scope::Public, 1, None))
            .await
            .unwrap();
        let value = serde_json::to_value(&page).unwrap();

        assert!(value.get("products").is_some());
        assert!(value.get("totalPages").is_some());
        assert!(value.get("currentPage").is_some());
        assert!(value.get("totalCount").is_some());
        let product = &value["products"][0];
        assert!(product.get("imageUrl").is_some());
        assert!(product.get("createdAt").is_some());
    }
}
