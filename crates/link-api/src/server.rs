//! Axum server and routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use link_graph::{LinkGraphService, StatsProjection};
use link_types::{
    EdgeStoreError, EdgeWindowRequest, EdgeWindowResponse, QuotesResponse, StatsFormat,
    ThreadResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub struct AppState {
    pub service: LinkGraphService,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/datasets/:dataset/links/thread/:tweet_id",
            get(handle_thread),
        )
        .route(
            "/datasets/:dataset/links/quotes/:tweet_id",
            get(handle_quotes),
        )
        .route(
            "/datasets/:dataset/links/by-indices",
            post(handle_by_indices),
        )
        .route("/datasets/:dataset/links/node-stats", get(handle_node_stats))
        .route("/health", get(handle_health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// EdgeStoreError mapped onto HTTP. NotFound is routine ("graph not built
/// yet") and logged at debug; only genuine driver failures are errors.
pub struct ApiError(EdgeStoreError);

impl From<EdgeStoreError> for ApiError {
    fn from(e: EdgeStoreError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            EdgeStoreError::NotFound => {
                tracing::debug!("links graph not found");
                (
                    StatusCode::NOT_FOUND,
                    "Links graph not found for dataset".to_string(),
                )
            }
            EdgeStoreError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            EdgeStoreError::Upstream(detail) => {
                tracing::error!(error = %detail, "storage backend failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "storage backend unavailable".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    #[serde(default)]
    pub chain_limit: Option<i64>,
    #[serde(default)]
    pub desc_limit: Option<i64>,
}

async fn handle_thread(
    State(state): State<Arc<AppState>>,
    Path((dataset, tweet_id)): Path<(String, String)>,
    Query(q): Query<ThreadQuery>,
) -> Result<Json<ThreadResponse>, ApiError> {
    let thread = state
        .service
        .thread(&dataset, &tweet_id, q.chain_limit, q.desc_limit)
        .await?;
    Ok(Json(thread))
}

#[derive(Debug, Deserialize)]
pub struct QuotesQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

async fn handle_quotes(
    State(state): State<Arc<AppState>>,
    Path((dataset, tweet_id)): Path<(String, String)>,
    Query(q): Query<QuotesQuery>,
) -> Result<Json<QuotesResponse>, ApiError> {
    let quotes = state.service.quotes(&dataset, &tweet_id, q.limit).await?;
    Ok(Json(quotes))
}

async fn handle_by_indices(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
    Json(request): Json<EdgeWindowRequest>,
) -> Result<Json<EdgeWindowResponse>, ApiError> {
    let window = state.service.edges_by_indices(&dataset, &request).await?;
    Ok(Json(window))
}

#[derive(Debug, Deserialize)]
pub struct NodeStatsQuery {
    #[serde(default)]
    pub format: StatsFormat,
}

async fn handle_node_stats(
    State(state): State<Arc<AppState>>,
    Path(dataset): Path<String>,
    Query(q): Query<NodeStatsQuery>,
) -> Result<Json<StatsProjection>, ApiError> {
    let stats = state.service.node_stats(&dataset, q.format).await?;
    Ok(Json(stats))
}

async fn handle_health() -> &'static str {
    "ok"
}
