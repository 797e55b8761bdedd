//! matchpick-server - ranked list of upcoming sports matches
//!
//! Reads the match catalog from a flat JSON file, scores each match and
//! serves the top entries plus a small browser client.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use matchpick_common::config::{load_env_file, ConfigOverrides, ServiceConfig};
use matchpick_common::store::{CatalogLoad, FallbackStore};
use matchpick_server::api::buildinfo::BuildInfo;
use matchpick_server::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for matchpick-server
#[derive(Parser, Debug)]
#[command(name = "matchpick-server")]
#[command(about = "Ranked upcoming sports matches")]
#[command(version)]
struct Args {
    /// Port to listen on (env: PORT, default 3030)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (env: MATCHPICK_BIND, default 0.0.0.0)
    #[arg(short, long)]
    bind: Option<String>,

    /// Catalog JSON file (env: MATCHPICK_DATA_FILE, default ./data.json)
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Config file, instead of the platform default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "matchpick_server=info,matchpick_common=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!("Starting {} built {}", build.label(), build.build_timestamp);

    match load_env_file(None) {
        Ok(Some(path)) => info!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("{}", e),
    }

    let args = Args::parse();
    let config = ServiceConfig::resolve(&ConfigOverrides {
        port: args.port,
        data_file: args.data_file,
        bind: args.bind,
        config_file: args.config,
    });

    let store = FallbackStore::new(&config.data_file);
    match store.load().await {
        CatalogLoad::Loaded(catalog) => info!(
            "Catalog {}: {} matches",
            store.path().display(),
            catalog.len()
        ),
        CatalogLoad::Missing => info!(
            "Catalog {} not found, serving empty list until a demo is uploaded",
            store.path().display()
        ),
        CatalogLoad::Unreadable(reason) => warn!(
            "Catalog {} unreadable ({}), serving empty list",
            store.path().display(),
            reason
        ),
    }

    let app = build_router(AppState::new(store));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server running on {}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
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
            info!("Received SIGTERM, shutting down");
        },
    }
}
