use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// All settings can be overridden via environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/boutique | Working directory (database, uploads, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | {WORK_DIR}/database/boutique.db | SQLite file |
/// | ADMIN_USER | admin | Basic-auth username for /api/admin |
/// | ADMIN_PASSWORD | admin123 | Basic-auth password for /api/admin |
/// | WHATSAPP_NUMBER | 916281287188 | Order handoff number |
/// | STORE_NAME | Lotus Aura | Store name used in order messages |
/// | REQUEST_TIMEOUT_MS | 30000 | Request timeout (milliseconds) |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | LOG_LEVEL | info | tracing level filter |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file; defaults under the working directory
    pub database_path: Option<String>,
    /// Basic-auth credentials guarding the admin API
    pub admin_user: String,
    pub admin_password: String,
    /// WhatsApp number orders are handed off to
    pub whatsapp_number: String,
    /// Store name rendered into order messages
    pub store_name: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// tracing level filter
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/boutique".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            admin_user: std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into()),
            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .unwrap_or_else(|_| "916281287188".into()),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "Lotus Aura".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }

    /// Resolved SQLite database file path.
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("database/boutique.db"),
        }
    }

    /// Directory uploaded image binaries are stored in.
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads/images")
    }

    /// Whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
