//! Observability HTTP Routes
//!
//! Health check and the counter metrics snapshot.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::observability::{MetricsRegistry, MetricsSnapshot};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check routes, mounted at the root.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Metrics routes.
pub fn observability_routes(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/observability/metrics", get(metrics_handler))
        .with_state(metrics)
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "draftdb",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn metrics_handler(State(metrics): State<Arc<MetricsRegistry>>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
