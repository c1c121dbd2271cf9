//! Admin product handlers
//!
//! CRUD over the catalog. The admin view ignores the `published` flag;
//! deletes cascade gallery rows in the store and then clean blobs up
//! best-effort.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use validator::Validate;

use shared::models::{Product, ProductCreate, ProductImage, ProductUpdate};

use crate::api::{ListParams, parse_id, parse_page};
use crate::catalog::query::{CatalogPage, CatalogRequest, Scope, fetch_page};
use crate::core::ServerState;
use crate::db::repository::{product, product_image};
use crate::utils::{AppError, AppResult};

/// Admin detail payload: the product plus its gallery, any publication state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProductDetail {
    pub product: Product,
    pub images: Vec<ProductImage>,
}

/// GET /api/admin/products - admin listing (includes unpublished)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<CatalogPage>> {
    let page = parse_page(params.page.as_deref())?;
    let req = CatalogRequest::new(Scope::Admin, page, params.search);
    let result = fetch_page(state.pool(), &req).await?;
    Ok(Json(result))
}

/// POST /api/admin/products - create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product = product::create(state.pool(), payload).await?;
    tracing::info!(id = product.id, name = %product.name, "Product created");
    Ok(Json(product))
}

/// GET /api/admin/products/{id} - admin detail, any publication state
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<AdminProductDetail>> {
    let id = parse_id(&raw_id)?;

    let product = product::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;
    let images = product_image::find_by_product(state.pool(), id).await?;

    Ok(Json(AdminProductDetail { product, images }))
}

/// PUT /api/admin/products/{id} - update a product
pub async fn update(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&raw_id)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let product = product::update(state.pool(), id, payload).await?;
    tracing::info!(id = product.id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/admin/products/{id} - delete a product
///
/// The store cascades the gallery rows; blob objects are removed afterwards
/// best-effort. A blob that is already gone never fails the delete.
pub async fn delete(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<bool>> {
    let id = parse_id(&raw_id)?;

    let product = product::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

    // Collect blob paths before the rows disappear
    let mut blob_paths = product_image::paths_for_product(state.pool(), id).await?;
    blob_paths.push(product.image_path.clone());

    product::delete(state.pool(), id).await?;

    let mut removed = 0usize;
    for path in &blob_paths {
        if state.blob.delete(path).await {
            removed += 1;
        }
    }
    tracing::info!(
        id = id,
        blobs_removed = removed,
        blobs_total = blob_paths.len(),
        "Product deleted"
    );

    Ok(Json(true))
}
