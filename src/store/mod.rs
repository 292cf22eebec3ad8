//! Document store subsystem
//!
//! Owns all documents, their version state, and the checkout/commit
//! protocol. The change log is append-only and owned by its document;
//! the version hash is the optimistic-concurrency token that serializes
//! concurrent edits.

mod change_log;
mod document;
mod errors;
mod hash;
#[allow(clippy::module_inception)]
mod store;

pub use change_log::{ChangeAction, ChangeCommit, ChangeLog};
pub use document::Document;
pub use errors::{StoreError, StoreResult};
pub use hash::version_hash;
pub use store::DocumentStore;
