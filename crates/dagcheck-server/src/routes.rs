//! HTTP routes for dagcheck server.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::HeaderValue,
    response::Json,
    routing::{get, post},
};
use dagcheck_core::{Analysis, AnalyzeOptions, Pipeline};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::ServerConfig;
use crate::error::{ServerError, ServerResult};

/// Application state shared across handlers.
///
/// Read-only after startup; every request builds its own graph.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Options applied to every analysis.
    pub options: AnalyzeOptions,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<HeaderValue>,
}

impl AppState {
    /// Build handler state from the server configuration.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let allowed_origins = config
            .allowed_origins
            .iter()
            .map(|origin| parse_origin(origin))
            .collect::<ServerResult<Vec<_>>>()?;

        Ok(Self {
            options: config.options,
            allowed_origins,
        })
    }
}

fn parse_origin(origin: &str) -> ServerResult<HeaderValue> {
    // Credentials are allowed, which rules out the wildcard origin.
    if origin == "*" {
        return Err(ServerError::InvalidOrigin(origin.to_string()));
    }
    HeaderValue::from_str(origin).map_err(|_| ServerError::InvalidOrigin(origin.to_string()))
}

/// Create the router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(state.allowed_origins.iter().cloned()))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/health", get(health_handler))
        .route("/pipelines/parse", post(parse_pipeline_handler))
        .layer(cors)
        .with_state(state)
}

/// Health check handler.
async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Count the nodes and edges of a pipeline and check that it is a DAG.
async fn parse_pipeline_handler(
    State(state): State<Arc<AppState>>,
    Json(pipeline): Json<Pipeline>,
) -> ServerResult<Json<Analysis>> {
    let graph = pipeline
        .graph(&state.options)
        .inspect_err(|e| tracing::warn!("Rejected pipeline: {}", e))?;

    let analysis = Analysis::of(&graph);

    if !analysis.is_dag && tracing::enabled!(tracing::Level::DEBUG) {
        if let Some(cycle) = graph.find_cycle() {
            tracing::debug!("Pipeline contains a cycle: {}", cycle.join(" → "));
        }
    }

    Ok(Json(analysis))
}
