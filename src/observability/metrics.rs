//! Metrics registry
//!
//! Counters only, monotonically increasing, reset on process start.
//! Increments use relaxed atomics; metrics never affect execution.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the document protocol.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Documents brought into existence
    documents_created: AtomicU64,
    /// Advisory checkouts recorded (idempotent repeats excluded)
    checkouts_recorded: AtomicU64,
    /// Content commits accepted
    commits_accepted: AtomicU64,
    /// Content commits rejected on a stale version hash
    commits_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a registry with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_documents_created(&self) {
        self.documents_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_checkouts_recorded(&self) {
        self.checkouts_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_commits_accepted(&self) {
        self.commits_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_commits_rejected(&self) {
        self.commits_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            documents_created: self.documents_created.load(Ordering::Relaxed),
            checkouts_recorded: self.checkouts_recorded.load(Ordering::Relaxed),
            commits_accepted: self.commits_accepted.load(Ordering::Relaxed),
            commits_rejected: self.commits_rejected.load(Ordering::Relaxed),
        }
    }
}

/// Serializable counter snapshot, served by the metrics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub documents_created: u64,
    pub checkouts_recorded: u64,
    pub commits_accepted: u64,
    pub commits_rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let snapshot = MetricsRegistry::new().snapshot();
        assert_eq!(snapshot.documents_created, 0);
        assert_eq!(snapshot.commits_accepted, 0);
        assert_eq!(snapshot.commits_rejected, 0);
    }

    #[test]
    fn test_increments_are_visible_in_snapshot() {
        let metrics = MetricsRegistry::new();
        metrics.increment_documents_created();
        metrics.increment_commits_accepted();
        metrics.increment_commits_accepted();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.documents_created, 1);
        assert_eq!(snapshot.commits_accepted, 2);
        assert_eq!(snapshot.checkouts_recorded, 0);
    }

    #[test]
    fn test_snapshot_serializes_counter_names() {
        let metrics = MetricsRegistry::new();
        metrics.increment_commits_rejected();

        let value = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(value["commits_rejected"], 1);
    }
}
