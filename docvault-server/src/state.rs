//! Application state for docvault-server

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::DbService;
use crate::error::BoxError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite database service
    pub db: DbService,
    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the database, apply migrations and make sure the bootstrap admin exists
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url).await?;
        db.seed_admin(
            &config.admin_email,
            &config.admin_password,
            &config.admin_name,
        )
        .await?;

        Ok(Self {
            db,
            config: Arc::new(config.clone()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}
