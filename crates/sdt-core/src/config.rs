//! Configuration management for SDT
//!
//! Loads configuration with priority:
//! 1. Explicit config file (or config.toml found from the current directory upwards)
//! 2. Environment variables (`${VAR}` references, libpq `PG*` variables)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// SDT configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdtConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Metadata store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store provider (in-memory, postgres, sqlite)
    #[serde(default = "default_store_provider")]
    pub provider: String,

    /// Connection string (can reference env var with ${VAR_NAME})
    pub connection_string: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Create the metadata tables on connect
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
            connection_string: None,
            max_connections: default_max_connections(),
            run_migrations: true,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_format: LogFormat::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StoreConfig {
    /// Connection string for the configured provider.
    ///
    /// A postgres provider without an explicit connection string falls back to
    /// the libpq environment variables (PGHOST, PGPORT, PGUSER, PGPASSWORD, PGDATABASE).
    pub fn resolved_connection_string(&self) -> Result<String> {
        if let Some(ref conn) = self.connection_string {
            return Ok(conn.clone());
        }

        match self.provider.as_str() {
            "postgres" => Self::connection_string_from_pg_env().ok_or_else(|| {
                Error::config_error(
                    "store.connection_string is not set and PGUSER/PGDATABASE are missing",
                )
            }),
            "sqlite" => Ok("sqlite::memory:".to_string()),
            other => Err(Error::config_error(format!(
                "Store provider '{}' does not take a connection string",
                other
            ))),
        }
    }

    fn connection_string_from_pg_env() -> Option<String> {
        let user = env::var("PGUSER").ok()?;
        let database = env::var("PGDATABASE").ok()?;
        let host = env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("PGPORT").unwrap_or_else(|_| "5432".to_string());

        let credentials = match env::var("PGPASSWORD") {
            Ok(password) if !password.is_empty() => format!("{}:{}", user, password),
            _ => user,
        };

        Some(format!(
            "postgres://{}@{}:{}/{}",
            credentials, host, port, database
        ))
    }
}

impl SdtConfig {
    /// Load configuration from config.toml (searched upwards), or defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::find_config_file()? {
                Some(p) => p,
                None => {
                    let mut config = Self::default();
                    config.resolve_env_vars();
                    return Ok(config);
                }
            },
        };

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            Error::config_error(format!(
                "Failed to read config file {:?}: {}",
                config_path, e
            ))
        })?;

        Self::from_toml_str(&contents).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{:?}: {}", config_path, msg)),
            other => other,
        })
    }

    /// Parse configuration from TOML text and resolve env var references
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: SdtConfig = toml::from_str(contents)
            .map_err(|e| Error::config_error(format!("Failed to parse config: {}", e)))?;

        config.resolve_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Find config.toml by searching current directory and parents
    pub fn find_config_file() -> Result<Option<PathBuf>> {
        let mut current = env::current_dir()?;

        loop {
            let config_path = current.join("config.toml");
            if config_path.exists() {
                return Ok(Some(config_path));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Resolve ${VAR_NAME} references to environment variables
    fn resolve_env_vars(&mut self) {
        if let Some(ref conn) = self.store.connection_string {
            self.store.connection_string = Self::resolve_env_var(conn);
        }

        if let Some(host) = Self::resolve_env_var(&self.server.host) {
            self.server.host = host;
        }
    }

    /// Resolve a single ${VAR_NAME} reference
    fn resolve_env_var(value: &str) -> Option<String> {
        if value.starts_with("${") && value.ends_with('}') {
            let var_name = &value[2..value.len() - 1];
            env::var(var_name).ok()
        } else {
            Some(value.to_string())
        }
    }

    fn validate(&self) -> Result<()> {
        match self.store.provider.as_str() {
            "in-memory" | "postgres" | "sqlite" => {}
            other => {
                return Err(Error::config_error(format!(
                    "Unknown store provider '{}' (expected in-memory, postgres or sqlite)",
                    other
                )));
            }
        }

        if self.store.max_connections == 0 {
            return Err(Error::config_error("store.max_connections must be at least 1"));
        }

        Ok(())
    }

    /// Create test-friendly defaults (in-memory store, ephemeral port)
    pub fn test_defaults() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: 0,
            },
            store: StoreConfig::default(),
            observability: ObservabilityConfig {
                log_filter: "debug".to_string(),
                ..ObservabilityConfig::default()
            },
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_store_provider() -> String {
    "in-memory".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

fn default_service_name() -> String {
    "sdt".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SdtConfig::test_defaults();
        assert_eq!(config.store.provider, "in-memory");
        assert_eq!(config.server.port, 0);
        assert!(config.store.run_migrations);
    }

    #[test]
    fn test_parse_full_config() {
        let config = SdtConfig::from_toml_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 3000

            [store]
            provider = "sqlite"
            connection_string = "sqlite://metadata.db"
            max_connections = 4

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.store.provider, "sqlite");
        assert_eq!(config.store.max_connections, 4);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_filter, "info");
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = SdtConfig::from_toml_str(
            r#"
            [store]
            provider = "mongodb"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("mongodb"));
    }

    #[test]
    fn test_resolve_env_var() {
        unsafe {
            env::set_var("SDT_TEST_VAR", "test_value");
        }

        let resolved = SdtConfig::resolve_env_var("${SDT_TEST_VAR}");
        assert_eq!(resolved, Some("test_value".to_string()));

        let not_var = SdtConfig::resolve_env_var("plain_value");
        assert_eq!(not_var, Some("plain_value".to_string()));

        unsafe {
            env::remove_var("SDT_TEST_VAR");
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [server]
            port = 9090
            "#
        )
        .unwrap();

        let config = SdtConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.store.provider, "in-memory");
    }

    #[test]
    fn test_find_config_file_returns_existing_file() {
        if let Some(path) = SdtConfig::find_config_file().unwrap() {
            assert!(path.ends_with("config.toml"));
            assert!(path.is_file());
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = SdtConfig::load_from(Some(Path::new("/nonexistent/sdt/config.toml")))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_explicit_connection_string_wins() {
        let store = StoreConfig {
            provider: "postgres".to_string(),
            connection_string: Some("postgres://app@db/schema".to_string()),
            ..StoreConfig::default()
        };
        assert_eq!(
            store.resolved_connection_string().unwrap(),
            "postgres://app@db/schema"
        );
    }

    #[test]
    fn test_in_memory_has_no_connection_string() {
        let store = StoreConfig::default();
        assert!(store.resolved_connection_string().is_err());
    }
}
