//! draftdb - a check-in/check-out collaborative document store
//!
//! Documents are edited through an optimistic-concurrency commit
//! protocol: editors check out, edit, and commit against the version
//! hash they last observed. Every action lands in an append-only change
//! log with a structured diff, and the merge renderer turns that history
//! into a per-author attributed view of the current content.

pub mod cli;
pub mod diff;
pub mod http_server;
pub mod observability;
pub mod render;
pub mod store;
