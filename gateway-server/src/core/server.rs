//! Server Implementation
//!
//! HTTP server startup and graceful shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::core::{AppState, Config};

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<AppState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (shared with tests or tooling)
    pub fn with_state(config: Config, state: AppState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => AppState::initialize(&self.config).await?,
        };

        state.start_background_tasks();

        let app = api::router()
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_millis(
                self.config.request_timeout_ms,
            )))
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Vehicle gateway listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}
