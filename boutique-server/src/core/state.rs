use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{BlobStore, LocalBlobStore};

/// Server state - shared references to all per-request services
///
/// Cloned into every request; all members are cheap to clone
/// (connection pool handle, `Arc`).
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite database service
    pub db: DbService,
    /// Blob store for product image binaries
    pub blob: Arc<dyn BlobStore>,
}

impl ServerState {
    /// Initialize server state.
    ///
    /// Creates the working directory layout, opens the database (applying
    /// migrations) and wires up the local blob store.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db_path = config.database_path();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(config.images_dir())?;

        let db = DbService::new(&db_path.to_string_lossy()).await?;
        let blob = Arc::new(LocalBlobStore::new(config.images_dir()));

        Ok(Self {
            config: config.clone(),
            db,
            blob,
        })
    }

    /// Database connection pool handle.
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
