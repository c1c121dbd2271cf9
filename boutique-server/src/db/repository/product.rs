//! Product Repository

use super::{RepoError, RepoResult, escape_like};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::SqlitePool;

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, category, tags, tag_color, material, pattern, wash_care, dispatch_time, image_url, image_path, published, created_at";

/// Search predicate over name, category and tags. The bound pattern must be
/// pre-escaped (see [`escape_like`]); SQLite LIKE is case-insensitive.
const SEARCH_PREDICATE: &str = "(name LIKE ?1 ESCAPE '\\' OR category LIKE ?1 ESCAPE '\\' OR tags LIKE ?1 ESCAPE '\\')";

fn like_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Count rows matching the listing predicate.
///
/// Runs against the same predicate as [`find_page`] so the page slice and
/// the total can never drift within one request.
pub async fn count_matching(
    pool: &SqlitePool,
    published_only: bool,
    search: Option<&str>,
) -> RepoResult<i64> {
    let count = match search {
        Some(term) => {
            let sql = if published_only {
                format!("SELECT COUNT(*) FROM products WHERE published = 1 AND {SEARCH_PREDICATE}")
            } else {
                format!("SELECT COUNT(*) FROM products WHERE {SEARCH_PREDICATE}")
            };
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(like_pattern(term))
                .fetch_one(pool)
                .await?
        }
        None => {
            let sql = if published_only {
                "SELECT COUNT(*) FROM products WHERE published = 1"
            } else {
                "SELECT COUNT(*) FROM products"
            };
            sqlx::query_scalar::<_, i64>(sql).fetch_one(pool).await?
        }
    };
    Ok(count)
}

/// Fetch one listing page, newest first.
pub async fn find_page(
    pool: &SqlitePool,
    published_only: bool,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Product>> {
    let rows = match search {
        Some(term) => {
            let sql = if published_only {
                format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE published = 1 AND {SEARCH_PREDICATE} ORDER BY id DESC LIMIT ?2 OFFSET ?3"
                )
            } else {
                format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE {SEARCH_PREDICATE} ORDER BY id DESC LIMIT ?2 OFFSET ?3"
                )
            };
            sqlx::query_as::<_, Product>(&sql)
                .bind(like_pattern(term))
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = if published_only {
                format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE published = 1 ORDER BY id DESC LIMIT ?1 OFFSET ?2"
                )
            } else {
                format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id DESC LIMIT ?1 OFFSET ?2"
                )
            };
            sqlx::query_as::<_, Product>(&sql)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Find a product by id regardless of publication state (admin view).
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Find a published product by id (public view).
pub async fn find_published_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ? AND published = 1");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Published products excluding one id, newest first.
///
/// Serves both the `latest` and `filler` candidate pools of the
/// related-items selection (they differ only in cap).
pub async fn find_published_excluding(
    pool: &SqlitePool,
    exclude_id: i64,
    limit: i64,
) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE published = 1 AND id != ?1 ORDER BY id DESC LIMIT ?2"
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Published products sharing a category, excluding one id, newest first.
pub async fn find_in_category_excluding(
    pool: &SqlitePool,
    category: &str,
    exclude_id: i64,
    limit: i64,
) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE published = 1 AND category = ?1 AND id != ?2 ORDER BY id DESC LIMIT ?3"
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(category)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Create a new product with its gallery images in one transaction.
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let name = data.name.trim().to_string();
    if name.is_empty() {
        return Err(RepoError::Validation("name cannot be empty".into()));
    }
    if data.price < 0 {
        return Err(RepoError::Validation("price cannot be negative".into()));
    }
    if data.stock < 0 {
        return Err(RepoError::Validation("stock cannot be negative".into()));
    }

    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO products (name, description, price, stock, category, tags, tag_color, material, pattern, wash_care, dispatch_time, image_url, image_path, published, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
    )
    .bind(&name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(&data.category)
    .bind(&data.tags)
    .bind(&data.tag_color)
    .bind(&data.material)
    .bind(&data.pattern)
    .bind(&data.wash_care)
    .bind(&data.dispatch_time)
    .bind(&data.image_url)
    .bind(&data.image_path)
    .bind(data.published)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    for (index, img) in data.images.iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, image_path, display_order) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id)
        .bind(&img.image_url)
        .bind(&img.image_path)
        .bind(index as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update a product.
///
/// Scalar columns are replaced wholesale. The primary image pair is only
/// touched when a new reference is supplied. The gallery is replaced
/// (delete + reinsert) inside the same transaction so a failure can never
/// leave the product without its images.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let name = data.name.trim().to_string();
    if name.is_empty() {
        return Err(RepoError::Validation("name cannot be empty".into()));
    }
    if data.price < 0 {
        return Err(RepoError::Validation("price cannot be negative".into()));
    }
    if data.stock < 0 {
        return Err(RepoError::Validation("stock cannot be negative".into()));
    }

    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE products SET name = ?1, description = ?2, price = ?3, stock = ?4, category = ?5, tags = ?6, tag_color = ?7, material = ?8, pattern = ?9, wash_care = ?10, dispatch_time = ?11, image_url = COALESCE(?12, image_url), image_path = COALESCE(?13, image_path), published = ?14 WHERE id = ?15",
    )
    .bind(&name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.stock)
    .bind(&data.category)
    .bind(&data.tags)
    .bind(&data.tag_color)
    .bind(&data.material)
    .bind(&data.pattern)
    .bind(&data.wash_care)
    .bind(&data.dispatch_time)
    .bind(&data.image_url)
    .bind(&data.image_path)
    .bind(data.published)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    sqlx::query("DELETE FROM product_images WHERE product_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    for (index, img) in data.images.iter().enumerate() {
        sqlx::query(
            "INSERT INTO product_images (product_id, image_url, image_path, display_order) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id)
        .bind(&img.image_url)
        .bind(&img.image_path)
        .bind(index as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Hard delete a product. Gallery rows go with it via the FK cascade.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}
