//! rollgated — the rollout gate daemon.
//!
//! Serves `/stable.json` and `/stable.json.sig` from a local artifact
//! directory, gating each request through the time-phased rollout
//! schedule in `rollout.json`. Stateless by construction: every
//! request re-fetches the schedule and recomputes its decision.
//!
//! # Usage
//!
//! ```text
//! rollgated --port 8080 --artifact-dir /var/lib/rollgate
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use rollgate_core::GateConfig;

#[derive(Parser)]
#[command(name = "rollgated", about = "Rollout gate daemon")]
struct Cli {
    /// Path to a rollgate.toml config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides the config file).
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding rollout.json and the version artifacts.
    #[arg(long)]
    artifact_dir: Option<PathBuf>,

    /// Request header trusted to carry the client address.
    #[arg(long)]
    client_ip_header: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rollgated=debug,rollgate=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GateConfig::from_file(path)?,
        None => GateConfig::default(),
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = cli.artifact_dir {
        config.artifact_dir = dir;
    }
    if let Some(header) = cli.client_ip_header {
        config.client_ip_header = header;
    }

    run(config).await
}

async fn run(config: GateConfig) -> anyhow::Result<()> {
    info!(dir = ?config.artifact_dir, "rollout gate starting");

    let store = rollgate_store::BlobStore::open_dir(&config.artifact_dir);

    let state = rollgate_api::GateState {
        store,
        client_ip_header: config.client_ip_header.clone(),
    };
    let router = rollgate_api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "gate listening");

    // Graceful shutdown on Ctrl-C.
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to install CTRL+C handler");
            info!("shutdown signal received");
        })
        .await?;

    info!("rollout gate stopped");
    Ok(())
}
