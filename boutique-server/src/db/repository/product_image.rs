//! Product Gallery Image Repository

use super::RepoResult;
use shared::models::ProductImage;
use sqlx::SqlitePool;

/// Gallery images for a product, in display order.
pub async fn find_by_product(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<ProductImage>> {
    let rows = sqlx::query_as::<_, ProductImage>(
        "SELECT id, product_id, image_url, image_path, display_order FROM product_images WHERE product_id = ? ORDER BY display_order ASC, id ASC",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Blob paths of all gallery images for a product (for cleanup on delete).
pub async fn paths_for_product(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<String>> {
    let paths = sqlx::query_scalar::<_, String>(
        "SELECT image_path FROM product_images WHERE product_id = ?",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::product::tests::{seed_product, test_pool};

    async fn seed_image(pool: &SqlitePool, product_id: i64, path: &str, order: i64) {
        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, image_path, display_order) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(product_id)
        .bind(format!("/api/image/{path}"))
        .bind(path)
        .bind(order)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn gallery_is_ordered_by_display_order() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Saree", None, None, true).await;
        seed_image(&pool, 1, "third.jpg", 2).await;
        seed_image(&pool, 1, "first.jpg", 0).await;
        seed_image(&pool, 1, "second.jpg", 1).await;

        let gallery = find_by_product(&pool, 1).await.unwrap();
        let paths: Vec<_> = gallery.iter().map(|i| i.image_path.as_str()).collect();
        assert_eq!(paths, vec!["first.jpg", "second.jpg", "third.jpg"]);
    }

    #[tokio::test]
    async fn paths_only_cover_the_requested_product() {
        let pool = test_pool().await;
        seed_product(&pool, 1, "Saree", None, None, true).await;
        seed_product(&pool, 2, "Lehenga", None, None, true).await;
        seed_image(&pool, 1, "mine.jpg", 0).await;
        seed_image(&pool, 2, "theirs.jpg", 0).await;

        let paths = paths_for_product(&pool, 1).await.unwrap();
        assert_eq!(paths, vec!["mine.jpg".to_string()]);
    }
}
