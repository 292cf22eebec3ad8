//! Attribution rendering subsystem
//!
//! Produces the merged view of a document in which every recorded diff
//! block is visually tied to the user whose commit produced it. Rendering
//! is a pure read; it is invoked by consumers after a fetch and is not a
//! boundary operation of its own.

mod merge;
mod palette;

pub use merge::{render, strip_markup, RenderedView};
pub use palette::{UserPalette, REMOVED_COLOR, USER_COLORS};
