//! API router and server setup
//!
//! Configures axum routes and runs the HTTP server.

use crate::config::ServerConfig;
use crate::server::{
    handlers::{health_check, home, predict},
    state::AppState,
    Result, ServerError,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

/// Build the router over a given state.
/// `/predict` only has a POST handler, so other methods get 405 from axum
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/predict", post(predict))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Prediction server
pub struct PredictionServer {
    config: ServerConfig,
    state: AppState,
}

impl PredictionServer {
    /// Create the server, loading the model named in the config.
    /// Fails only when a model file exists but can't be loaded
    pub fn new(config: ServerConfig) -> Result<Self> {
        let state = AppState::from_artifact(&config.model_path)?;
        Ok(Self { config, state })
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Run the server
    pub async fn run(&self) -> Result<()> {
        let addr = self.config.address;
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(format!("{addr}: {e}")))?;

        tracing::info!(
            model_loaded = self.state.model_loaded(),
            "Salary prediction server running on http://{addr}"
        );

        axum::serve(listener, self.router())
            .await
            .map_err(ServerError::Io)?;

        Ok(())
    }

    /// Get the configured address
    pub fn address(&self) -> SocketAddr {
        self.config.address
    }

    /// State the router is built over, with the model loaded at startup if any
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
