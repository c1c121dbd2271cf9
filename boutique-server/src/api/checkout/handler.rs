//! Checkout handler

use axum::{Json, extract::State};
use validator::Validate;

use shared::models::{CheckoutRequest, CheckoutResponse};

use crate::checkout::prepare_checkout;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/checkout - resolve the cart and build the WhatsApp handoff
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let response = prepare_checkout(
        state.pool(),
        &payload,
        &state.config.store_name,
        &state.config.whatsapp_number,
    )
    .await?;

    Ok(Json(response))
}
