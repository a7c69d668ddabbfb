use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig, StoreConfig};
use service::storage::{DocumentStore, JsonDocumentStore};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the store named by the config: in-memory or file-backed.
pub async fn open_store(cfg: &StoreConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    if cfg.in_memory {
        warn!("store.in_memory is set; data will not survive a restart");
        return Ok(JsonDocumentStore::in_memory());
    }
    service::runtime::ensure_data_dir(&cfg.data_dir).await?;
    let store = JsonDocumentStore::open(&cfg.data_dir).await?;
    Ok(store)
}

/// Router with production layers over the given store.
pub fn build_app(store: Arc<dyn DocumentStore>) -> Router {
    routes::build_router(AppState::new(store), build_cors())
}

fn bind_addr(cfg: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.host, cfg.port).parse()?)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C; shutdown only by process exit");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, draining connections");
}

/// Public entry: load config, open the store, serve until Ctrl+C, then
/// flush and close the store.
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    let store = open_store(&cfg.store).await?;
    let app = build_app(Arc::clone(&store));

    let addr = bind_addr(&cfg.server)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, data_dir = %cfg.store.data_dir, in_memory = cfg.store.in_memory, "service catalog listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await?;
    info!("document store closed");
    Ok(())
}
