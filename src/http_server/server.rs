//! HTTP Server
//!
//! Assembles the document and observability routers over one shared
//! store, applies CORS from configuration, and serves.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use super::config::HttpServerConfig;
use super::document_routes::{document_routes, DocumentState};
use super::observability_routes::{health_routes, observability_routes};
use crate::observability::{Event, Logger, MetricsRegistry};
use crate::store::DocumentStore;

/// HTTP server for the document version-control API.
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with default configuration.
    pub fn new() -> Self {
        Self::with_config(HttpServerConfig::default())
    }

    /// Create a server with custom configuration.
    pub fn with_config(config: HttpServerConfig) -> Self {
        let router = Self::build_router(&config);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig) -> Router {
        let metrics = Arc::new(MetricsRegistry::new());
        let store = Arc::new(DocumentStore::with_metrics(Arc::clone(&metrics)));
        let document_state = Arc::new(DocumentState::new(store));

        let cors = if config.cors_origins.is_empty() {
            // Permissive for development when no origins are configured.
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(document_routes(document_state))
            .merge(observability_routes(metrics))
            .layer(cors)
    }

    /// The socket address this server will bind.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The assembled router (for serving or in-process testing).
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {e}", self.config.socket_addr()),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        Logger::info(Event::ServerStarted.name(), &[("addr", &bound)]);
        println!("draftdb serving on http://{bound}");
        println!("  POST /documents           create");
        println!("  GET  /documents/:id       fetch");
        println!("  POST /documents/checkout  checkout");
        println!("  POST /documents/commit    commit");

        axum::serve(listener, self.router).await
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_uses_configured_address() {
        let server = HttpServer::with_config(HttpServerConfig::with_port(9999));
        assert_eq!(server.socket_addr(), "0.0.0.0:9999");
    }

    #[test]
    fn test_default_server_builds_router() {
        let server = HttpServer::new();
        let _router = server.router();
    }
}
