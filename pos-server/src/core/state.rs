//! Server state shared by every handler

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;
use rand::distributions::Alphanumeric;
use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::db::repository::user;

/// Server state
///
/// Cheap to clone; every field is a handle.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | configuration loaded at startup |
/// | db | SQLite pool |
/// | jwt_service | token issuing and validation |
/// | started_at | uptime reference for `/health` |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub jwt_service: Arc<JwtService>,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, db: DbService, jwt_service: Arc<JwtService>) -> Self {
        Self {
            config,
            db,
            jwt_service,
            started_at: Instant::now(),
        }
    }

    /// Open the database, run migrations and bootstrap the first admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        if !config.uses_memory_database() {
            std::fs::create_dir_all(PathBuf::from(&config.work_dir))?;
        }

        let db = DbService::new(&config.database_url).await?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let state = Self::new(config.clone(), db, jwt_service);

        state.bootstrap_admin().await?;
        Ok(state)
    }

    /// Create the configured admin when the user table is empty
    async fn bootstrap_admin(&self) -> Result<()> {
        let (password, generated) = match &self.config.admin_password {
            Some(p) => (p.clone(), false),
            None => (generate_password(), true),
        };

        let created = user::ensure_admin(self.pool(), &self.config.admin_username, &password)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        if let Some(admin) = created {
            tracing::info!(username = %admin.username, "Bootstrap administrator created");
            if generated {
                tracing::warn!(
                    username = %admin.username,
                    password = %password,
                    "Generated administrator password, change it after first login"
                );
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
