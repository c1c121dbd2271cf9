//! Unified error handling
//!
//! [`AppError`] is the application error enum; its [`IntoResponse`] impl
//! maps each variant to an HTTP status and a stable error code.
//!
//! # Error code scheme
//!
//! | Code | Category |
//! |-------|----------|
//! | E3001 | Authentication |
//! | E0002 | Validation |
//! | E0003 | Not found |
//! | E9002 | Database |
//! | E9001 | Internal |

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or wrong admin credentials (401, prompts for basic auth)
    #[error("Authentication required")]
    Unauthorized,

    /// Resource does not exist (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed or rejected input (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Relational or blob store call failed (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Anything else that should never surface details to the client (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "E3001",
                "Authentication required".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            code: code.to_string(),
            message,
        });

        // The admin gate is HTTP basic auth: a 401 must invite the browser
        // to prompt for credentials.
        if matches!(self, AppError::Unauthorized) {
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"Admin Area\"")],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

/// Result type for handlers
pub type AppResult<T> = Result<T, AppError>;
