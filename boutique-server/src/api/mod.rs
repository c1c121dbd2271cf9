use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub mod admin_products;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod upload;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Listing query parameters shared by the public and admin endpoints.
///
/// `page` arrives as a raw string so a malformed value can be rejected
/// explicitly rather than silently defaulted.
#[derive(Debug, serde::Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub search: Option<String>,
}

/// Parse a path segment as a product id.
pub(crate) fn parse_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation(format!("Invalid product id: {raw}")))
}

/// Parse an optional `page` query parameter. Absent means page 1; anything
/// non-numeric is rejected. Values below 1 are clamped later.
pub(crate) fn parse_page(raw: Option<&str>) -> AppResult<i64> {
    match raw {
        None => Ok(1),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::validation(format!("Invalid page number: {s}"))),
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Public storefront API
        .merge(catalog::router())
        .merge(checkout::router())
        // Admin API - basic auth required
        .merge(admin_products::router())
        // Upload + image serving
        .merge(upload::router())
        // Health - public route
        .merge(health::router())
}

/// Build the fully configured application with middleware and state.
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // ========== Tower HTTP Middleware ==========
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request logging
        .layer(TraceLayer::new_for_http())
        // Request timeout
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // Request ID - generate and propagate a unique id per request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // ========== Application Middleware ==========
        // Admin basic-auth gate
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ))
        .with_state(state.clone())
}
