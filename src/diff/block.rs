//! Diff Block - the atomic unit of recorded change
//!
//! A diff block describes one contiguous span of text and how it changed
//! relative to the previous snapshot. Blocks are immutable once recorded
//! in a commit.
//!
//! Offsets are cumulative character positions across a commit's block
//! sequence in emission order: each block occupies the half-open range
//! `[start_offset, end_offset)` where the width equals the block's length
//! in characters. Line numbers count newline characters preceding each
//! offset in the same cumulative stream. All positions are measured in
//! Unicode scalar values, never bytes.

use serde::{Deserialize, Serialize};

/// How a span of text changed relative to the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOperation {
    /// Text present in both snapshots.
    Equal,
    /// Text added by the new snapshot.
    Insert,
    /// Text removed from the previous snapshot.
    Delete,
}

impl DiffOperation {
    /// Returns the wire-format name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffOperation::Equal => "equal",
            DiffOperation::Insert => "insert",
            DiffOperation::Delete => "delete",
        }
    }
}

impl std::fmt::Display for DiffOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One contiguous span of text and how it changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffBlock {
    /// The literal text span.
    pub content: String,
    /// How this span changed.
    pub operation: DiffOperation,
    /// Newlines preceding `start_offset` in the cumulative block stream.
    pub start_line: usize,
    /// First character position occupied by this block (inclusive).
    pub start_offset: usize,
    /// Newlines preceding `end_offset` in the cumulative block stream.
    pub end_line: usize,
    /// Character position one past the block (exclusive).
    pub end_offset: usize,
}

impl DiffBlock {
    /// Width of the block's range in characters.
    pub fn char_len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// True when the range is well formed: ordered and as wide as the text.
    pub fn is_well_formed(&self) -> bool {
        self.start_offset <= self.end_offset && self.content.chars().count() == self.char_len()
    }
}
