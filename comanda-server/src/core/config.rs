use std::path::PathBuf;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | Working directory for the database and logs |
/// | HTTP_PORT | 8000 | HTTP API port |
/// | DATABASE_PATH | <work_dir>/comandas.db | SQLite database file |
/// | SESSION_TTL_MINUTES | 30 | Session inactivity window |
/// | ENVIRONMENT | development | Runtime environment |
/// | LOG_DIR | (unset) | Daily-rotated log files, read in `setup_environment` |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/comandas HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database file and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file; defaults to `<work_dir>/comandas.db`
    pub database_path: Option<String>,
    /// Minutes of inactivity before a session expires
    pub session_ttl_minutes: i64,
    /// Runtime environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to the defaults above.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            session_ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override selected settings
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Resolved path to the SQLite database file
    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(&self.work_dir).join("comandas.db"),
        }
    }

    /// Whether this is a production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Whether this is a development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
