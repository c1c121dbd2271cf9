//! Image Upload Handler
//!
//! Accepts product images from the admin form, validates and recompresses
//! them, and stores them under a content-hash filename so repeated uploads
//! of the same image land on the same object.

use axum::Json;
use axum::extract::{Multipart, State};
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::PathBuf;

use crate::core::ServerState;
use crate::services::StoredBlob;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for product images (keeps color fidelity while bounding size)
const JPEG_QUALITY: u8 = 85;

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({}): {}",
            ext_lower, e
        )));
    }

    Ok(())
}

/// Re-encode as JPEG at the configured quality
fn compress_image(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

/// POST /api/admin/upload - upload a product image
///
/// Responds with the stored object's display URL and its opaque path,
/// which the admin form carries into the product payload.
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<StoredBlob>> {
    // Find the file field
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart.next_field().await? {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(f.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }

    let ext = PathBuf::from(&filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {filename}")))?;

    validate_image(&data, &ext)?;

    let compressed = compress_image(&data)?;

    // Content-hash filename: identical uploads dedupe naturally
    let file_hash = calculate_hash(&compressed);
    let stored_name = format!("{}.jpg", &file_hash[..16]);

    let blob = state.blob.put(&stored_name, &compressed).await?;

    tracing::info!(
        original_name = %filename,
        stored = %blob.path,
        size = compressed.len(),
        "Image uploaded"
    );

    Ok(Json(blob))
}
