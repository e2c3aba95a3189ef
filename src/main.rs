//! `sdt` - schema design tool backend
//!
//! ```bash
//! # Serve the HTTP API (config.toml is searched upwards from the cwd)
//! sdt serve --port 3000
//!
//! # Create the metadata tables and exit
//! sdt --config deploy/config.toml migrate
//!
//! # Print the CREATE TABLE statement of table 1
//! sdt generate-sql --table-id 1
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sdt_core::SdtConfig;
use sdt_telemetry::{TelemetryOptions, init_telemetry};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sdt", version, about = "Schema design admin backend")]
struct Cli {
    /// Configuration file (defaults to the nearest config.toml)
    #[arg(long, global = true, env = "SDT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Create the metadata tables and exit
    Migrate,
    /// Print the CREATE TABLE statement for a stored table
    GenerateSql {
        #[arg(long)]
        table_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => Some(path),
        None => SdtConfig::find_config_file().context("Failed to search for config.toml")?,
    };
    let mut config = SdtConfig::load_from(config_path.as_deref())
        .context("Failed to load configuration")?;

    init_telemetry(&TelemetryOptions::from(&config.observability));
    match &config_path {
        Some(path) => tracing::debug!(path = %path.display(), "Loaded configuration"),
        None => tracing::debug!("No config.toml found, using defaults"),
    }

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Migrate => {
            config.store.run_migrations = true;
            sdt_store::connect(&config.store)
                .await
                .context("Failed to migrate metadata store")?;
            tracing::info!(provider = %config.store.provider, "Migrations complete");
            Ok(())
        }
        Command::GenerateSql { table_id } => {
            let store = sdt_store::connect(&config.store)
                .await
                .context("Failed to connect metadata store")?;
            let ddl = sdt_ddl::generate_create_table(store.as_ref(), table_id).await?;
            println!("{}", ddl);
            Ok(())
        }
    }
}

async fn serve(config: SdtConfig) -> Result<()> {
    let store = sdt_store::connect(&config.store)
        .await
        .context("Failed to connect metadata store")?;

    let app = sdt_server::create_router(store);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(%addr, provider = %config.store.provider, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
