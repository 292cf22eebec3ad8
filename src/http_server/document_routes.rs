//! Document HTTP Routes
//!
//! The boundary operations of the version-control protocol: create,
//! fetch, checkout, and commit. Request and response bodies use the
//! camelCase wire format the editing surface consumes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Document, DocumentStore, StoreError};

// ==================
// Shared State
// ==================

/// State shared across document handlers.
pub struct DocumentState {
    pub store: Arc<DocumentStore>,
}

impl DocumentState {
    pub fn new(store: Arc<DocumentStore>) -> Self {
        Self { store }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    pub title: String,
    pub content: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDocumentRequest {
    pub document_id: Uuid,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDocumentRequest {
    pub document_id: Uuid,
    pub user_id: String,
    pub content: String,
    pub checkout_version_hash: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

// ==================
// Document Routes
// ==================

/// Create document routes.
pub fn document_routes(state: Arc<DocumentState>) -> Router {
    Router::new()
        .route("/documents", post(create_document_handler))
        .route("/documents/:id", get(fetch_document_handler))
        .route("/documents/checkout", post(checkout_document_handler))
        .route("/documents/commit", post(commit_document_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn create_document_handler(
    State(state): State<Arc<DocumentState>>,
    Json(request): Json<CreateDocumentRequest>,
) -> Json<Document> {
    let document = state
        .store
        .create(&request.title, &request.content, &request.user_id);
    Json(document)
}

async fn fetch_document_handler(
    State(state): State<Arc<DocumentState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    state.store.get(id).map(Json).map_err(error_response)
}

async fn checkout_document_handler(
    State(state): State<Arc<DocumentState>>,
    Json(request): Json<CheckoutDocumentRequest>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .checkout(request.document_id, &request.user_id)
        .map(Json)
        .map_err(error_response)
}

async fn commit_document_handler(
    State(state): State<Arc<DocumentState>>,
    Json(request): Json<CommitDocumentRequest>,
) -> Result<Json<Document>, (StatusCode, Json<ErrorResponse>)> {
    state
        .store
        .commit(
            request.document_id,
            &request.user_id,
            &request.content,
            &request.checkout_version_hash,
        )
        .map(Json)
        .map_err(error_response)
}

fn error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            code,
        }),
    )
}
