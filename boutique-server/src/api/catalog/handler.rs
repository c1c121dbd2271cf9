//! Public catalog handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{Product, ProductImage};

use crate::api::{ListParams, parse_id, parse_page};
use crate::catalog::query::{CatalogPage, CatalogRequest, Scope, fetch_page};
use crate::catalog::related::fetch_related;
use crate::core::ServerState;
use crate::db::repository::{product, product_image};
use crate::utils::{AppError, AppResult};

/// Product detail payload: the product, its ordered gallery and the
/// related-products strip.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product: Product,
    pub images: Vec<ProductImage>,
    pub related: Vec<Product>,
}

/// GET /api/products - public catalog page (published only)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<CatalogPage>> {
    let page = parse_page(params.page.as_deref())?;
    let req = CatalogRequest::new(Scope::Public, page, params.search);
    let result = fetch_page(state.pool(), &req).await?;
    Ok(Json(result))
}

/// GET /api/products/{id} - product detail with gallery and related items
pub async fn detail(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<ProductDetail>> {
    let id = parse_id(&raw_id)?;

    let product = product::find_published_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

    let images = product_image::find_by_product(state.pool(), id).await?;
    let related = fetch_related(state.pool(), &product).await?;

    Ok(Json(ProductDetail {
        product,
        images,
        related,
    }))
}

/// GET /api/products/{id}/related - related products alone
pub async fn related(
    State(state): State<ServerState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let id = parse_id(&raw_id)?;

    let product = product::find_published_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {id}")))?;

    let related = fetch_related(state.pool(), &product).await?;
    Ok(Json(related))
}
