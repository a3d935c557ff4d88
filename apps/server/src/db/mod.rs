//! Database module providing connection management, migrations, and queries.
//!
//! Each submodule adds `impl DbPool` blocks for one aggregate. Compound
//! mutations run inside a single transaction so readers never observe a
//! partially applied change.

pub mod activities;
pub mod api_tokens;
pub mod projects;
pub mod summary;
pub mod test_cases;
pub mod test_runs;
pub mod users;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::{Config, DatabaseConfig};
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Shared handle to the database connection pool.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Create a new database pool from configuration.
    pub async fn new(config: &Config) -> AppResult<Self> {
        Self::connect(&config.database).await
    }

    /// Connect with explicit database settings.
    pub async fn connect(settings: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ConnectOptions::new(settings.url.clone());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        info!(
            max_connections = settings.max_connections,
            "Database pool created"
        );

        Ok(DbPool { conn })
    }

    /// Get access to the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply all pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        Ok(())
    }
}
