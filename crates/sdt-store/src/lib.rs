//! Metadata store backends for SDT
//!
//! `InMemoryStore` is always available; the SQL backends are behind the
//! `postgres` and `sqlite` features.

use sdt_core::{Error, MetadataStore, Result, StoreConfig};
use std::sync::Arc;

pub mod inmemory;

#[cfg(feature = "sqlx")]
pub mod database;

pub use inmemory::InMemoryStore;

#[cfg(feature = "postgres")]
pub use database::PostgresStore;

#[cfg(feature = "sqlite")]
pub use database::SqliteStore;

/// Open the store selected by `config.provider`
pub async fn connect(config: &StoreConfig) -> Result<Arc<dyn MetadataStore>> {
    tracing::info!(provider = %config.provider, "Connecting metadata store");

    match config.provider.as_str() {
        "in-memory" => Ok(Arc::new(InMemoryStore::new())),
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = config.resolved_connection_string()?;
            let store = PostgresStore::connect(&url, config.max_connections).await?;
            if config.run_migrations {
                store.migrate().await?;
            }
            Ok(Arc::new(store))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let url = config.resolved_connection_string()?;
            let store = SqliteStore::connect(&url, config.max_connections).await?;
            if config.run_migrations {
                store.migrate().await?;
            }
            Ok(Arc::new(store))
        }
        other => Err(Error::config_error(format!(
            "Store provider '{}' is not available in this build",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_in_memory() {
        let store = connect(&StoreConfig::default()).await.unwrap();
        store.ping().await.unwrap();
        assert!(store.list_databases().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_unknown_provider() {
        let config = StoreConfig {
            provider: "oracle".to_string(),
            ..StoreConfig::default()
        };
        let err = connect(&config).await.err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
