//! Store Error Types
//!
//! The protocol surfaces exactly two failures: an unknown document
//! identity, and a stale optimistic-concurrency token on commit. Neither
//! is retried by the store itself; a conflicting committer must re-fetch
//! and redo the whole checkout/edit/commit cycle.

use thiserror::Error;
use uuid::Uuid;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Unknown document identity.
    #[error("Document not found: {0}")]
    NotFound(Uuid),

    /// Stale version hash presented on commit.
    #[error(
        "Version conflict on document {document_id}: submitted hash {submitted} does not match current {current}"
    )]
    VersionConflict {
        document_id: Uuid,
        submitted: String,
        current: String,
    },
}

impl StoreError {
    /// Stable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "NOT_FOUND",
            StoreError::VersionConflict { .. } => "VERSION_CONFLICT",
        }
    }

    /// HTTP status code for the error.
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::VersionConflict { .. } => 409,
        }
    }
}
