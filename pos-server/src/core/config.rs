use std::path::PathBuf;

use crate::auth::{JwtConfig, JwtError};
use crate::db::MEMORY_DATABASE_URL;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | data directory |
/// | DATABASE_URL | sqlite:<WORK_DIR>/pos.db | SQLite location |
/// | HTTP_PORT | 8080 | HTTP port |
/// | ENVIRONMENT | development | development / production |
/// | LOG_LEVEL | info | default log level |
/// | LOG_DIR | unset | rolling log file directory |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | SHUTDOWN_TIMEOUT_MS | 10000 | graceful shutdown grace |
/// | ADMIN_USERNAME | admin | bootstrap admin |
/// | ADMIN_PASSWORD | generated | bootstrap admin password |
///
/// `JWT_*` variables are read by [`JwtConfig::from_env`].
///
/// ```ignore
/// WORK_DIR=/srv/pos HTTP_PORT=9000 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_url: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    /// development | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub request_timeout_ms: u64,
    pub shutdown_timeout_ms: u64,
    pub admin_username: String,
    /// `None` means a random password is generated on first start
    pub admin_password: Option<String>,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Fails only when the JWT secret is missing or too short.
    pub fn from_env() -> Result<Self, JwtError> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| {
            let path = PathBuf::from(&work_dir).join("pos.db");
            format!("sqlite:{}", path.display())
        });

        Ok(Self {
            database_url,
            http_port: env_or("HTTP_PORT", 8080),
            jwt: JwtConfig::from_env()?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: env_or("REQUEST_TIMEOUT_MS", 30_000),
            shutdown_timeout_ms: env_or("SHUTDOWN_TIMEOUT_MS", 10_000),
            admin_username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into()),
            admin_password: std::env::var("ADMIN_PASSWORD").ok().filter(|p| !p.is_empty()),
            work_dir,
        })
    }

    /// In-memory database, fixed secret and known admin credentials
    pub fn for_testing() -> Self {
        Self {
            work_dir: std::env::temp_dir().display().to_string(),
            database_url: MEMORY_DATABASE_URL.to_string(),
            http_port: 0,
            jwt: JwtConfig::for_testing(),
            environment: "test".into(),
            log_level: "debug".into(),
            log_dir: None,
            request_timeout_ms: 5_000,
            shutdown_timeout_ms: 1_000,
            admin_username: "admin".into(),
            admin_password: Some("admin123".into()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn uses_memory_database(&self) -> bool {
        self.database_url == MEMORY_DATABASE_URL
    }
}
