//! API Server
//!
//! Runs the REST server with CORS and request tracing, and wires the
//! graceful-shutdown signal through a broadcast channel.

use crate::error::{Error, Result};
use crate::service::AdvisorService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::rest::RestRouter;

// =============================================================================
// Server Configuration
// =============================================================================

/// Configuration for the API server
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// REST API bind address
    pub rest_addr: SocketAddr,
    /// Enable permissive CORS for browser dashboards
    pub cors_enabled: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            rest_addr: "0.0.0.0:8090".parse().expect("static bind address"),
            cors_enabled: true,
        }
    }
}

// =============================================================================
// API Server
// =============================================================================

/// REST API server for the advisor
pub struct ApiServer {
    config: ApiServerConfig,
    service: Arc<AdvisorService>,
    shutdown_tx: broadcast::Sender<()>,
}

impl ApiServer {
    /// Create a new API server
    pub fn new(config: ApiServerConfig, service: Arc<AdvisorService>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            config,
            service,
            shutdown_tx,
        }
    }

    /// Run the API server until shutdown
    pub async fn run(&self) -> Result<()> {
        let mut app = RestRouter::new(self.service.clone())
            .build()
            .layer(TraceLayer::new_for_http());

        if self.config.cors_enabled {
            app = app.layer(CorsLayer::permissive());
        }

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        info!("REST API listening on {}", self.config.rest_addr);

        let listener = tokio::net::TcpListener::bind(self.config.rest_addr)
            .await
            .map_err(|e| Error::Internal(format!("Failed to bind REST server: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("REST server shutting down");
            })
            .await
            .map_err(|e| Error::Internal(format!("REST server error: {}", e)))?;

        Ok(())
    }

    /// Trigger graceful shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiServerConfig::default();
        assert_eq!(config.rest_addr.port(), 8090);
        assert!(config.cors_enabled);
    }
}
