//! Product Gallery Image Model

use serde::{Deserialize, Serialize};

/// Secondary gallery image, owned by a product
///
/// Rows cascade-delete with their parent product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    pub image_url: String,
    pub image_path: String,
    /// Gallery position, ascending
    #[serde(default)]
    pub display_order: i64,
}

/// Gallery image reference as submitted by the admin form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageInput {
    pub image_url: String,
    pub image_path: String,
}
