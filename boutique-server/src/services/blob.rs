//! Blob store for product image binaries
//!
//! The catalog rows only carry references: a display URL plus an opaque
//! path used for deletion. This service owns the binaries behind them.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use crate::utils::AppError;

/// A stored object: display URL plus the opaque path used to delete it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlob {
    pub url: String,
    pub path: String,
}

/// Object storage contract for image binaries.
///
/// `delete` is best-effort and idempotent — a missing object is not an
/// error, and callers never fail a catalog mutation on a blob failure.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<StoredBlob, AppError>;

    /// Returns true when a stored object was actually removed.
    async fn delete(&self, path: &str) -> bool;
}

/// Reject anything that is not a bare filename.
fn is_safe_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

/// Local-filesystem blob store serving objects under `/api/image/`.
pub struct LocalBlobStore {
    images_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(images_dir: PathBuf) -> Self {
        Self { images_dir }
    }

    /// Resolve a stored filename to its on-disk path, guarding traversal.
    pub fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if !is_safe_filename(filename) {
            return None;
        }
        Some(self.images_dir.join(filename))
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<StoredBlob, AppError> {
        let file_path = self
            .resolve(filename)
            .ok_or_else(|| AppError::validation("Invalid filename"))?;

        fs::create_dir_all(&self.images_dir)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create images directory: {e}")))?;
        fs::write(&file_path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

        Ok(StoredBlob {
            url: format!("/api/image/{filename}"),
            path: filename.to_string(),
        })
    }

    async fn delete(&self, path: &str) -> bool {
        let Some(file_path) = self.resolve(path) else {
            tracing::warn!(path = %path, "Refusing to delete unsafe blob path");
            return false;
        };

        match fs::remove_file(&file_path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Failed to delete blob");
                false
            }
        }
    }
}
