//! Diffing subsystem
//!
//! Turns a pair of content snapshots into the structured diff recorded in
//! the change log: an ordered sequence of equal/insert/delete blocks whose
//! equal+insert side reconstructs the new content and whose equal+delete
//! side reconstructs the previous content.

mod block;
mod engine;

pub use block::{DiffBlock, DiffOperation};
pub use engine::{diff, reconstruct_new, reconstruct_previous};
