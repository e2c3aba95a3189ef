//! PostgreSQL-backed metadata store

use sdt_core::{Error, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

use super::store_error;

/// PostgreSQL-backed metadata store
pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    /// Open a connection pool; does not touch the schema
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| Error::unavailable(format!("Failed to connect to PostgreSQL: {}", e)))?;

        tracing::info!(max_connections, "Connected to PostgreSQL metadata store");
        Ok(Self { pool })
    }

    /// Create from an existing pool
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Create the metadata tables if they do not exist
    pub async fn migrate(&self) -> Result<()> {
        super::migrations::run_postgres_migrations(&self.pool)
            .await
            .map_err(|e| store_error("run migrations", e))
    }
}

impl_sql_store!(PostgresStore);
