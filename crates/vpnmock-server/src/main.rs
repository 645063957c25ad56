//! vpnmock server
//!
//! Mock VPN management API: CRUD over servers, rules and profiles, plus a
//! fake connect/disconnect cycle with history. All state is in memory and
//! resets on restart.

mod config;
mod response;
mod routes;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vpnmock_core::{SeedData, VpnStore};

use crate::config::ServerConfig;

// Use mimalloc as the global allocator for reduced memory fragmentation
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .init();

    let seed = match &config.seed_file {
        Some(path) => SeedData::from_json_file(path)
            .with_context(|| format!("failed to load seed file {}", path.display()))?,
        None => SeedData::default(),
    };
    tracing::info!(
        "Seeded {} servers, {} rules, {} profiles",
        seed.servers.len(),
        seed.rules.len(),
        seed.profiles.len()
    );

    let app = routes::build_router(VpnStore::new(seed));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
