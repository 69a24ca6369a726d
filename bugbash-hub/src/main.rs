//! BugBash Hub - Main entry point
//!
//! Realtime relay service for team-testing coordination: fans issue and
//! session mutations out to connected testers and leads, scoped by
//! session room.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bugbash_hub::{create_router, AppContext, RoomRegistry};

const DEFAULT_PORT: u16 = 5760;

/// Command-line arguments for bugbash-hub
#[derive(Parser, Debug)]
#[command(name = "bugbash-hub")]
#[command(about = "Realtime relay service for BugBash")]
#[command(version)]
struct Args {
    /// Port to listen on (falls back to BUGBASH_HUB_PORT, then config file)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bugbash_hub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BugBash Hub v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let port = bugbash_common::config::resolve_listen_port(
        args.port,
        "BUGBASH_HUB_PORT",
        "hub_port",
        DEFAULT_PORT,
    );

    // One registry instance for the process lifetime, injected into handlers
    let registry = Arc::new(RoomRegistry::new());
    let app = create_router(AppContext { registry });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
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
