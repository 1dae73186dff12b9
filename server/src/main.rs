use std::sync::Arc;

use resource_server::{app_with_store, logging, InMemoryStore, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let config = ServerConfig::from_env()?;
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let store = Arc::new(InMemoryStore::new());
    info!(resources = store.len().await, empty = store.is_empty().await, "store ready");
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app_with_store(store.clone()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!(discarded = store.len().await, "server stopped; in-memory resources discarded");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
