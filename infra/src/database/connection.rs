//! MySQL connection pool

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::MySqlPool;
use std::str::FromStr;
use std::time::Duration;

use gh_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Pool shared by every MySQL repository
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connect using the pool limits of `config`
    ///
    /// # Returns
    /// * `Err(InfrastructureError::Config)` - Malformed `DATABASE_URL`
    /// * `Err(InfrastructureError::Database)` - Server unreachable or credentials rejected
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect_with(options)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "database_unavailable", "Failed to connect to MySQL");
                InfrastructureError::Database(e)
            })?;

        tracing::info!(
            max_connections = config.max_connections,
            event = "database_connected",
            "MySQL pool ready"
        );
        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Apply pending migrations from `infra/migrations`
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!(event = "migrations_applied", "Database schema is up to date");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!(event = "database_closed", "MySQL pool closed");
    }
}
