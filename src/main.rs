//! # todos
//!
//! Todo-list server binary: loads settings, initialises logging, opens the
//! store and serves the HTTP API until ctrl-c.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use todos_server::{ServerConfig, TodoService};
use todos_settings::TodosSettings;
use todos_store::Database;
use todos_telemetry::TelemetryConfig;

/// Multi-list todo server.
#[derive(Parser, Debug)]
#[command(name = "todos", about = "Multi-list todo server")]
struct Cli {
    /// Settings file (defaults to `./todos.json`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Host to bind (overrides settings).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, 0 for auto-assign (overrides settings).
    #[arg(long)]
    port: Option<u16>,

    /// `SQLite` database path, or `:memory:`.
    #[arg(long)]
    database: Option<String>,

    /// Log level: trace, debug, info, warn, error.
    #[arg(long)]
    log_level: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn apply(self, settings: &mut TodosSettings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(path) = self.database {
            settings.database.path = path;
        }
        if let Some(level) = self.log_level {
            settings.logging.level = level;
        }
        if self.json_logs {
            settings.logging.json = true;
        }
    }
}

/// Request traces follow the configured level like every other target.
fn telemetry_config(settings: &TodosSettings) -> TelemetryConfig {
    TelemetryConfig::from_level_str(&settings.logging.level, settings.logging.json)
}

fn open_database(settings: &TodosSettings) -> Result<Database> {
    if settings.database.is_in_memory() {
        return Database::in_memory().context("Failed to open in-memory database");
    }
    let path = Path::new(&settings.database.path);
    Database::open(path).with_context(|| format!("Failed to open database: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Cli::parse();

    let settings_path = args
        .config
        .take()
        .unwrap_or_else(todos_settings::settings_path);
    let mut settings = todos_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("Failed to load settings: {}", settings_path.display()))?;
    args.apply(&mut settings);

    let telemetry = telemetry_config(&settings);
    todos_telemetry::init_telemetry(&telemetry).context("Failed to initialise logging")?;

    let db = open_database(&settings)?;
    tracing::info!(path = %settings.database.path, "database ready");
    let service = TodoService::new(db);

    let config = ServerConfig {
        host: settings.server.host.clone(),
        port: settings.server.port,
    };
    let server = todos_server::start(config.clone(), service)
        .await
        .context("Failed to bind server")?;

    tracing::info!("todos listening on http://{}:{}", config.host, server.port);

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}
