//! dagcheck pipeline validation server.
//!
//! Exposes the cycle detector of `dagcheck-core` over HTTP.
//!
//! # Routes
//!
//! - `POST /pipelines/parse`: analyze a pipeline, answering
//!   `{num_nodes, num_edges, is_dag}` or `500 {"detail": ...}`
//! - `GET /health`: liveness check

pub mod error;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use dagcheck_core::AnalyzeOptions;

pub use error::{ErrorBody, ServerError, ServerResult};
pub use routes::{AppState, create_router};

/// Origins allowed by default: a frontend dev server on localhost.
pub const DEFAULT_ORIGINS: &[&str] = &["http://localhost", "http://localhost:3001"];

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Origins allowed by the CORS policy.
    pub allowed_origins: Vec<String>,
    /// Options applied to every analysis.
    pub options: AnalyzeOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
            options: AnalyzeOptions::default(),
        }
    }
}

/// Start the dagcheck server and run until Ctrl+C.
pub async fn serve(config: ServerConfig) -> ServerResult<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_router(state);

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", config.host, config.port)))?;

    tracing::info!("Starting dagcheck server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Handle Ctrl+C for graceful shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
