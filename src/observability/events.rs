//! Observable lifecycle events
//!
//! Every log line carries one of these event names. Events are explicit
//! and typed; free-form event strings do not appear in the codebase.

use std::fmt;

/// Observable events in draftdb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Server startup complete, ready to serve
    ServerStarted,
    /// Configuration loaded
    ConfigLoaded,

    // Document protocol
    /// Document brought into existence
    DocumentCreated,
    /// Advisory checkout recorded
    CheckoutRecorded,
    /// Content commit accepted
    CommitAccepted,
    /// Content commit rejected on a stale version hash
    CommitRejected,

    // Rendering
    /// Renderer recovered from malformed diff blocks
    RenderRecovered,
}

impl Event {
    /// Returns the event name as logged.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ServerStarted => "SERVER_STARTED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::DocumentCreated => "DOCUMENT_CREATED",
            Event::CheckoutRecorded => "CHECKOUT_RECORDED",
            Event::CommitAccepted => "COMMIT_ACCEPTED",
            Event::CommitRejected => "COMMIT_REJECTED",
            Event::RenderRecovered => "RENDER_RECOVERED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
