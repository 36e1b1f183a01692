//! Post-link graph API server.

use link_api::server::{self, AppState};
use link_graph::LinkGraphService;
use link_store::{FileEdgeStore, QdrantEdgeStore};
use link_types::EdgeStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Backend chosen once from configuration; requests never re-evaluate it.
    let backend = std::env::var("LINKS_BACKEND").unwrap_or_else(|_| "file".to_string());
    let store: Arc<dyn EdgeStore> = match backend.as_str() {
        "file" => {
            let data_dir =
                std::env::var("LINKS_DATA_DIR").unwrap_or_else(|_| "data".to_string());
            tracing::info!(data_dir = %data_dir, "using file-backed edge store");
            Arc::new(FileEdgeStore::new(data_dir))
        }
        "qdrant" => {
            let url = std::env::var("LINKS_QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".to_string());
            tracing::info!(url = %url, "using qdrant-backed edge store");
            Arc::new(QdrantEdgeStore::new(&url)?)
        }
        other => {
            return Err(format!("unknown LINKS_BACKEND: {}", other).into());
        }
    };

    let state = Arc::new(AppState {
        service: LinkGraphService::new(store),
    });
    let app = server::router(state);

    let addr: SocketAddr = std::env::var("LINKS_LISTEN")
        .unwrap_or_else(|_| "0.0.0.0:8010".to_string())
        .parse()?;
    tracing::info!("link graph API listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await?,
        app.into_make_service(),
    )
    .await?;
    Ok(())
}
