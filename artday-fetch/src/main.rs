//! artday-fetch - Art of the Day service
//!
//! Finds a rarely viewed, public-domain artwork with an image in the Art
//! Institute of Chicago collection and serves it to the front end.
//!
//! - `GET /art`, `POST /art/shuffle`, `GET /events`, `GET /health`
//! - `--once` runs a single cycle and prints the display JSON

use std::path::PathBuf;

use anyhow::{Context, Result};
use artday_common::events::EventBus;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artday_fetch::AppState;

/// Command-line arguments for artday-fetch
#[derive(Parser, Debug)]
#[command(name = "artday-fetch")]
#[command(about = "Art of the Day resolution service")]
#[command(version)]
struct Args {
    /// Config file (TOML); overrides ARTDAY_CONFIG and the user config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address; overrides bind_addr from the config file
    #[arg(short, long, env = "ARTDAY_BIND")]
    bind: Option<String>,

    /// Resolve one artwork, print it as JSON and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = artday_common::config::load_config(args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting artday-fetch v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!(
        api = %config.api_base_url,
        mode = ?config.lookup_mode,
        max_attempts = config.max_attempts,
        catalog_max_id = config.catalog_max_id,
        "Resolver configured"
    );

    let bind_addr = args.bind.clone().unwrap_or_else(|| config.bind_addr.clone());
    let event_bus = EventBus::new(100);
    let state = AppState::from_config(config, event_bus).context("Failed to build AIC client")?;

    if args.once {
        state.shuffle().await?;
        let snapshot = state.gallery.snapshot().await;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    // Initial page-load shuffle
    let initial = state.clone();
    tokio::spawn(async move {
        if let Err(e) = initial.shuffle().await {
            error!("Initial shuffle failed: {}", e);
        }
    });

    let app = artday_fetch::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    info!("Listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

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
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
