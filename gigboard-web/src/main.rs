//! gigboard-web - venue, artist and show directory server
//!
//! Resolves configuration (CLI > environment > TOML file > defaults), opens
//! the SQLite database under the root folder and serves the web UI.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gigboard_common::config::{
    default_config_path, load_toml_config, ConfigOverrides, ServerConfig,
};
use gigboard_common::db::init_database;
use gigboard_web::{build_router, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for gigboard-web
#[derive(Parser, Debug)]
#[command(name = "gigboard-web")]
#[command(about = "Venue, artist and show booking directory")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "GIGBOARD_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "GIGBOARD_HOST")]
    host: Option<String>,

    /// Root folder holding the database (GIGBOARD_ROOT_FOLDER is also honored)
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, env = "GIGBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().or_else(default_config_path);
    let file_config = match &config_path {
        Some(path) => load_toml_config(path).context("Failed to load config file")?,
        None => Default::default(),
    };

    let config = ServerConfig::resolve(
        ConfigOverrides {
            root_folder: args.root_folder,
            host: args.host,
            port: args.port,
        },
        file_config,
    )
    .context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "gigboard_web={0},gigboard_common={0},tower_http={0}",
                    config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before any database work
    info!(
        "Starting gigboard-web v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &config_path {
        Some(path) if !path.exists() => {
            warn!("Config file {} not found, using defaults", path.display())
        }
        Some(path) => info!("Config file: {}", path.display()),
        None => warn!("No platform config directory, using defaults"),
    }
    info!("Root folder: {}", config.root_folder.display());

    let db_path = config.database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path, config.max_connections)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready ({} max connections)", config.max_connections);

    let app = build_router(AppState::new(pool.clone()));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", config.host, config.port))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;
    info!("gigboard-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
