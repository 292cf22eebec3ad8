//! HTTP server subsystem
//!
//! The outer surface of the version-control protocol: axum routes over
//! one shared document store, plus health and metrics endpoints.

mod config;
mod document_routes;
mod observability_routes;
mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use document_routes::{
    document_routes, CheckoutDocumentRequest, CommitDocumentRequest, CreateDocumentRequest,
    DocumentState, ErrorResponse,
};
pub use observability_routes::{health_routes, observability_routes, HealthResponse};
pub use server::HttpServer;
