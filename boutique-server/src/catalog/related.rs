//! Related-products selection
//!
//! Merges three ranked candidate pools into at most four recommendations
//! for the product detail page. A same-category item lands in the first
//! two slots whenever one exists; generic filler guarantees non-empty
//! output even for an isolated category.

use std::collections::HashSet;

use shared::models::Product;
use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, product};

/// Maximum number of recommendations
pub const RELATED_LIMIT: usize = 4;

/// Candidate pool caps
const LATEST_POOL_SIZE: i64 = 5;
const CATEGORY_POOL_SIZE: i64 = 5;
const FILLER_POOL_SIZE: i64 = 8;

/// Merge the candidate pools in priority order.
///
/// Order: first of `latest`, first of `same_category`, remaining `latest`,
/// remaining `same_category`, then `filler`. Duplicates and the source
/// product are skipped; selection stops at [`RELATED_LIMIT`]. The result
/// keeps selection order.
pub fn select_related(
    source_id: i64,
    latest: Vec<Product>,
    same_category: Vec<Product>,
    filler: Vec<Product>,
) -> Vec<Product> {
    let mut seen = HashSet::new();
    seen.insert(source_id);

    let mut latest = latest.into_iter();
    let mut same_category = same_category.into_iter();
    let first_latest = latest.next();
    let first_category = same_category.next();

    let candidates = first_latest
        .into_iter()
        .chain(first_category)
        .chain(latest)
        .chain(same_category)
        .chain(filler);

    let mut selected = Vec::with_capacity(RELATED_LIMIT);
    for candidate in candidates {
        if selected.len() == RELATED_LIMIT {
            break;
        }
        if seen.insert(candidate.id) {
            selected.push(candidate);
        }
    }
    selected
}

/// Fetch the pools for a product and run the selection.
pub async fn fetch_related(pool: &SqlitePool, source: &Product) -> RepoResult<Vec<Product>> {
    let latest = product::find_published_excluding(pool, source.id, LATEST_POOL_SIZE).await?;
    let same_category = match &source.category {
        Some(category) => {
            product::find_in_category_excluding(pool, category, source.id, CATEGORY_POOL_SIZE)
                .await?
        }
        None => Vec::new(),
    };
    let filler = product::find_published_excluding(pool, source.id, FILLER_POOL_SIZE).await?;

    Ok(select_related(source.id, latest, same_category, filler))
}
