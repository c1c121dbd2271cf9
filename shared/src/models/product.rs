//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product_image::GalleryImageInput;

/// Product entity — one catalog row including its primary image reference
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Whole-rupee amount, no minor units
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
    pub category: Option<String>,
    /// Comma-separated display tags
    pub tags: Option<String>,
    pub tag_color: Option<String>,
    pub material: Option<String>,
    pub pattern: Option<String>,
    pub wash_care: Option<String>,
    pub dispatch_time: Option<String>,
    /// Primary image: URL for display, opaque path for blob deletion
    pub image_url: String,
    pub image_path: String,
    /// Unpublished products are admin-only
    #[serde(default = "default_true")]
    pub published: bool,
    /// Unix millis, set once at creation
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "stock must be non-negative"))]
    #[serde(default)]
    pub stock: i64,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub tag_color: Option<String>,
    pub material: Option<String>,
    pub pattern: Option<String>,
    pub wash_care: Option<String>,
    pub dispatch_time: Option<String>,
    #[validate(length(min = 1, message = "primary image url is required"))]
    pub image_url: String,
    #[validate(length(min = 1, message = "primary image path is required"))]
    pub image_path: String,
    #[serde(default = "default_true")]
    pub published: bool,
    /// Gallery images, stored in array order
    #[serde(default)]
    pub images: Vec<GalleryImageInput>,
}

/// Update product payload
///
/// Scalar fields are full-replace: the admin form always submits the whole
/// record, so an absent optional field clears the column. The primary image
/// pair is the one partial-update exception — omitting it keeps the stored
/// image. The gallery list is replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0, message = "price must be non-negative"))]
    pub price: i64,
    #[validate(range(min = 0, message = "stock must be non-negative"))]
    #[serde(default)]
    pub stock: i64,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub tag_color: Option<String>,
    pub material: Option<String>,
    pub pattern: Option<String>,
    pub wash_care: Option<String>,
    pub dispatch_time: Option<String>,
    /// New primary image reference; `None` preserves the existing one
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub images: Vec<GalleryImageInput>,
}
