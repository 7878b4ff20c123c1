use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use dispatch_server::config::{init_logging, ServerConfig};
use dispatch_server::router_with_body_limit;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, max_body_bytes = config.max_body_bytes, "dispatch-server listening");

    axum::serve(listener, router_with_body_limit(config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("dispatch-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
