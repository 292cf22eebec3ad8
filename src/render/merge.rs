//! Diff Merge Renderer
//!
//! Combines the diff blocks recorded across a document's change history
//! into one attributed rendering of the current content: every span some
//! commit touched is wrapped in a marker tied to that commit's author,
//! untouched text passes through verbatim.
//!
//! The renderer is a pure read of a `(content, change_history)` snapshot.
//! Malformed blocks never make it panic: the walk skips whatever slice is
//! already covered, counts the anomaly, and keeps going.

use crate::diff::{DiffBlock, DiffOperation};
use crate::store::ChangeLog;

use super::palette::{UserPalette, REMOVED_COLOR};

/// The result of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    markup: String,
    malformed_blocks: usize,
}

impl RenderedView {
    /// The attributed markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn into_markup(self) -> String {
        self.markup
    }

    /// Number of blocks skipped or clamped as inconsistent during the
    /// walk. Diagnostic only; the rendering itself is always produced.
    pub fn malformed_blocks(&self) -> usize {
        self.malformed_blocks
    }
}

struct Attributed<'a> {
    block: &'a DiffBlock,
    user_id: &'a str,
}

/// Render the attributed view of `content` from its change history.
pub fn render(content: &str, history: &ChangeLog) -> RenderedView {
    let mut blocks: Vec<Attributed<'_>> = history
        .iter()
        .filter(|commit| !commit.diff_blocks().is_empty())
        .flat_map(|commit| {
            commit
                .diff_blocks()
                .iter()
                .map(move |block| Attributed {
                    block,
                    user_id: commit.user_id(),
                })
        })
        .collect();
    // Stable: blocks sharing a start keep history order.
    blocks.sort_by_key(|a| a.block.start_offset);

    let chars: Vec<char> = content.chars().collect();
    let mut palette = UserPalette::new();
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0usize;
    let mut malformed = 0usize;

    for attributed in &blocks {
        let block = attributed.block;
        if block.end_offset < block.start_offset {
            malformed += 1;
            continue;
        }

        // Untouched text between the cursor and this block.
        if block.start_offset > cursor {
            let gap_end = block.start_offset.min(chars.len());
            if cursor < gap_end {
                out.extend(&chars[cursor..gap_end]);
                cursor = gap_end;
            }
        }

        match block.operation {
            DiffOperation::Equal => {
                // Equal blocks slice the content itself, so their range is
                // clamped to the uncovered, in-bounds portion.
                if block.start_offset < cursor || block.end_offset > chars.len() {
                    malformed += 1;
                }
                let from = block.start_offset.max(cursor).min(chars.len());
                let to = block.end_offset.min(chars.len()).max(from);
                out.extend(&chars[from..to]);
                cursor = cursor.max(to);
            }
            DiffOperation::Insert | DiffOperation::Delete => {
                if block.start_offset < cursor {
                    // Span already covered; dropping the marker is the only
                    // way to keep every original character appearing once.
                    malformed += 1;
                    continue;
                }
                let strike = block.operation == DiffOperation::Delete;
                let color = if strike {
                    REMOVED_COLOR
                } else {
                    palette.color_for(attributed.user_id)
                };
                push_marker(&mut out, color, strike, attributed.user_id, &block.content);
                cursor = cursor.max(block.end_offset);
            }
        }
    }

    if cursor < chars.len() {
        out.extend(&chars[cursor..]);
    }

    RenderedView {
        markup: out,
        malformed_blocks: malformed,
    }
}

/// Remove attribution tags from rendered markup, keeping their text.
pub fn strip_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn push_marker(out: &mut String, color: &str, strike: bool, user_id: &str, text: &str) {
    out.push_str("<span style=\"");
    if strike {
        out.push_str("text-decoration:line-through; ");
    }
    out.push_str("background-color:");
    out.push_str(color);
    out.push_str("; padding:2px;\" title=\"");
    out.push_str(user_id);
    out.push_str("\">");
    out.push_str(text);
    out.push_str("</span>");
}
