//! Basic-auth middleware for the admin API

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Admin gate — requires the configured basic-auth pair.
///
/// Only `/api/admin`-prefixed paths are challenged; everything else passes
/// through untouched. OPTIONS requests are let through for CORS preflight.
///
/// On failure responds 401 with a `WWW-Authenticate: Basic` header so
/// browsers prompt for credentials.
pub async fn require_admin(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if !path.starts_with("/api/admin") {
        return Ok(next.run(req).await);
    }

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header {
        Some(header)
            if check_basic_auth(header, &state.config.admin_user, &state.config.admin_password) =>
        {
            Ok(next.run(req).await)
        }
        Some(_) => {
            security_log!("WARN", "admin_auth_failed", uri = format!("{:?}", req.uri()));
            Err(AppError::Unauthorized)
        }
        None => {
            security_log!("WARN", "admin_auth_missing", uri = format!("{:?}", req.uri()));
            Err(AppError::Unauthorized)
        }
    }
}

/// Decode a `Basic` authorization header into its username/password pair.
fn decode_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (user, password) = text.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Check a `Basic` authorization header against the configured pair.
pub fn check_basic_auth(header: &str, user: &str, password: &str) -> bool {
    decode_basic(header).is_some_and(|(u, p)| u == user && p == password)
}
