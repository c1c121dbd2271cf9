//! Upload routes
//!
//! Admin image upload plus public serving of stored images.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::core::ServerState;

/// Serve stored image response
enum ImageFileResponse {
    Ok(Bytes, &'static str),
    NotFound,
    BadRequest(&'static str),
}

/// Stored objects are content-addressed, so they never change in place —
/// clients may cache them forever.
const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

impl IntoResponse for ImageFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            ImageFileResponse::Ok(content, content_type) => (
                http::StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, IMMUTABLE_CACHE),
                ],
                content,
            )
                .into_response(),
            ImageFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            ImageFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve a stored image by filename
async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ImageFileResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ImageFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.images_dir().join(&filename);

    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let mime = mime_guess::from_path(&filename).first_or_octet_stream();
            let content_type: &'static str = match mime.essence_str() {
                "image/jpeg" => "image/jpeg",
                "image/png" => "image/png",
                "image/webp" => "image/webp",
                _ => "application/octet-stream",
            };
            ImageFileResponse::Ok(content.into(), content_type)
        }
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Image not found");
            ImageFileResponse::NotFound
        }
    }
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Upload image API - admin gate applies
        .route("/api/admin/upload", post(handler::upload))
        // Serve stored images - public access
        .route("/api/image/{filename}", get(serve_image))
}
