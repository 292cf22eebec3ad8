//! Document Store - owner of all documents and the checkout/commit protocol
//!
//! Every operation is a transaction against a single document. Documents
//! live behind their own mutex, so operations on different documents run
//! in parallel while the check-hash, mutate, append sequence inside
//! `commit` stays atomic with respect to other commits on the same
//! document. All operations return an owned snapshot of the document.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use uuid::Uuid;

use super::change_log::ChangeAction;
use super::document::Document;
use super::errors::{StoreError, StoreResult};
use crate::diff;
use crate::observability::{Event, Logger, MetricsRegistry};

/// In-memory document store enforcing the checkout/commit protocol.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: RwLock<HashMap<Uuid, Arc<Mutex<Document>>>>,
    metrics: Arc<MetricsRegistry>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store sharing an externally owned metrics registry.
    pub fn with_metrics(metrics: Arc<MetricsRegistry>) -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
            metrics,
        }
    }

    pub fn metrics(&self) -> Arc<MetricsRegistry> {
        Arc::clone(&self.metrics)
    }

    /// Number of documents currently held.
    pub fn document_count(&self) -> usize {
        match self.documents.read() {
            Ok(map) => map.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// Create a new document. Always succeeds.
    pub fn create(&self, title: &str, initial_content: &str, user_id: &str) -> Document {
        let document = Document::create(title, initial_content, user_id);
        let snapshot = document.clone();
        let id = document.id();

        let mut map = match self.documents.write() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.insert(id, Arc::new(Mutex::new(document)));
        drop(map);

        self.metrics.increment_documents_created();
        let document_id = id.to_string();
        Logger::info(
            Event::DocumentCreated.name(),
            &[("document_id", &document_id), ("user_id", user_id)],
        );
        snapshot
    }

    /// Fetch a snapshot of a document, including its full change history.
    pub fn get(&self, document_id: Uuid) -> StoreResult<Document> {
        let entry = self.entry(document_id)?;
        let document = lock_document(&entry);
        Ok(document.clone())
    }

    /// Record an advisory checkout. Idempotent per user; never blocks
    /// other users' checkouts or commits.
    pub fn checkout(&self, document_id: Uuid, user_id: &str) -> StoreResult<Document> {
        let entry = self.entry(document_id)?;
        let mut document = lock_document(&entry);

        if document.record_checkout(user_id) {
            self.metrics.increment_checkouts_recorded();
            let id = document_id.to_string();
            Logger::info(
                Event::CheckoutRecorded.name(),
                &[("document_id", &id), ("user_id", user_id)],
            );
        }
        Ok(document.clone())
    }

    /// Commit new content against the version hash the committer last
    /// observed. A stale hash is rejected with `VersionConflict` and the
    /// document is left completely unchanged.
    pub fn commit(
        &self,
        document_id: Uuid,
        user_id: &str,
        new_content: &str,
        checkout_version_hash: &str,
    ) -> StoreResult<Document> {
        let entry = self.entry(document_id)?;
        let mut document = lock_document(&entry);

        if checkout_version_hash != document.version_hash() {
            self.metrics.increment_commits_rejected();
            let id = document_id.to_string();
            Logger::warn(
                Event::CommitRejected.name(),
                &[
                    ("document_id", &id),
                    ("user_id", user_id),
                    ("submitted_hash", checkout_version_hash),
                    ("current_hash", document.version_hash()),
                ],
            );
            return Err(StoreError::VersionConflict {
                document_id,
                submitted: checkout_version_hash.to_string(),
                current: document.version_hash().to_string(),
            });
        }

        let blocks = diff::diff(document.content(), new_content);
        let action = if document.has_content_commit() {
            ChangeAction::Update
        } else {
            ChangeAction::Commit
        };
        document.accept_commit(user_id, new_content.to_string(), blocks, action);

        self.metrics.increment_commits_accepted();
        let id = document_id.to_string();
        let version = document.version().to_string();
        Logger::info(
            Event::CommitAccepted.name(),
            &[
                ("action", action.as_str()),
                ("document_id", &id),
                ("user_id", user_id),
                ("version", &version),
            ],
        );
        Ok(document.clone())
    }

    fn entry(&self, document_id: Uuid) -> StoreResult<Arc<Mutex<Document>>> {
        let map = match self.documents.read() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };
        map.get(&document_id)
            .cloned()
            .ok_or(StoreError::NotFound(document_id))
    }
}

fn lock_document(entry: &Arc<Mutex<Document>>) -> MutexGuard<'_, Document> {
    match entry.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
