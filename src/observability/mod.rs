//! Observability subsystem
//!
//! Structured JSON logging and counter metrics for the document protocol.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on execution
//! 2. Deterministic output: identical operations log identical lines
//! 3. Synchronous, no background threads

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
