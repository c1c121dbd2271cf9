//! Cart and Checkout Models
//!
//! The cart itself lives client-side; these are the explicit value objects
//! the checkout endpoint exchanges.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One cart line: a product reference plus quantity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i64,
}

/// Checkout request: the full cart contents
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "cart is empty"), nested)]
    pub items: Vec<CartLine>,
}

/// Checkout response: the rendered order message and the wa.me handoff link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    pub url: String,
    /// Grand total in whole rupees
    pub total: i64,
}
