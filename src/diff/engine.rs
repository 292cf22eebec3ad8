//! Diff Engine
//!
//! Produces the equal/insert/delete block sequence between two content
//! snapshots. The contract: concatenating equal+insert blocks in range
//! order reconstructs the new content exactly, concatenating equal+delete
//! blocks reconstructs the previous content exactly, and identical inputs
//! always yield an identical block sequence.
//!
//! The algorithm trims the common prefix and suffix, runs a
//! longest-common-subsequence pass over the remaining characters, then
//! merges runs so that replacements come out as one delete followed by one
//! insert instead of character confetti.

use super::block::{DiffBlock, DiffOperation};

/// Equal runs shorter than this, sandwiched between edits, are folded into
/// the surrounding delete+insert pair.
const MIN_EQUAL_RUN: usize = 3;

/// Upper bound on the LCS table size. Inputs whose middle sections exceed
/// this fall back to a whole-span delete+insert pair.
const MAX_LCS_AREA: usize = 4_000_000;

/// Compute the diff between two content snapshots.
pub fn diff(previous: &str, new: &str) -> Vec<DiffBlock> {
    let prev: Vec<char> = previous.chars().collect();
    let next: Vec<char> = new.chars().collect();

    let mut prefix = 0;
    while prefix < prev.len() && prefix < next.len() && prev[prefix] == next[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < prev.len() - prefix
        && suffix < next.len() - prefix
        && prev[prev.len() - 1 - suffix] == next[next.len() - 1 - suffix]
    {
        suffix += 1;
    }

    let mut runs: Vec<(DiffOperation, String)> = Vec::new();
    if prefix > 0 {
        runs.push((DiffOperation::Equal, prev[..prefix].iter().collect()));
    }
    middle_runs(
        &prev[prefix..prev.len() - suffix],
        &next[prefix..next.len() - suffix],
        &mut runs,
    );
    if suffix > 0 {
        runs.push((DiffOperation::Equal, prev[prev.len() - suffix..].iter().collect()));
    }

    assign_ranges(normalize(runs))
}

/// Reconstruct the new content from a block sequence (equal + insert).
pub fn reconstruct_new(blocks: &[DiffBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.operation != DiffOperation::Delete)
        .map(|b| b.content.as_str())
        .collect()
}

/// Reconstruct the previous content from a block sequence (equal + delete).
pub fn reconstruct_previous(blocks: &[DiffBlock]) -> String {
    blocks
        .iter()
        .filter(|b| b.operation != DiffOperation::Insert)
        .map(|b| b.content.as_str())
        .collect()
}

/// Diff the middle section (after prefix/suffix trimming) into raw runs.
fn middle_runs(prev: &[char], next: &[char], runs: &mut Vec<(DiffOperation, String)>) {
    if prev.is_empty() && next.is_empty() {
        return;
    }
    if prev.is_empty() {
        runs.push((DiffOperation::Insert, next.iter().collect()));
        return;
    }
    if next.is_empty() {
        runs.push((DiffOperation::Delete, prev.iter().collect()));
        return;
    }
    if prev.len().saturating_mul(next.len()) > MAX_LCS_AREA {
        runs.push((DiffOperation::Delete, prev.iter().collect()));
        runs.push((DiffOperation::Insert, next.iter().collect()));
        return;
    }

    // LCS lengths of suffix pairs: table[i][j] = lcs(prev[i..], next[j..]).
    let width = next.len() + 1;
    let mut table = vec![0u32; (prev.len() + 1) * width];
    for i in (0..prev.len()).rev() {
        for j in (0..next.len()).rev() {
            table[i * width + j] = if prev[i] == next[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    // Forward walk. Ties advance the previous side first, so deletions are
    // emitted ahead of insertions at a replacement point.
    let mut i = 0;
    let mut j = 0;
    while i < prev.len() && j < next.len() {
        if prev[i] == next[j] {
            append_char(runs, DiffOperation::Equal, prev[i]);
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            append_char(runs, DiffOperation::Delete, prev[i]);
            i += 1;
        } else {
            append_char(runs, DiffOperation::Insert, next[j]);
            j += 1;
        }
    }
    while i < prev.len() {
        append_char(runs, DiffOperation::Delete, prev[i]);
        i += 1;
    }
    while j < next.len() {
        append_char(runs, DiffOperation::Insert, next[j]);
        j += 1;
    }
}

fn append_char(runs: &mut Vec<(DiffOperation, String)>, operation: DiffOperation, ch: char) {
    if let Some((last_op, text)) = runs.last_mut() {
        if *last_op == operation {
            text.push(ch);
            return;
        }
    }
    runs.push((operation, ch.to_string()));
}

/// Merge runs into canonical order: pending deletions flush before pending
/// insertions, and short equal runs between edits are folded into both
/// sides. Folding preserves both reconstruction directions because the run
/// joins the deleted and the inserted text alike.
fn normalize(runs: Vec<(DiffOperation, String)>) -> Vec<(DiffOperation, String)> {
    let mut out: Vec<(DiffOperation, String)> = Vec::new();
    let mut deleted = String::new();
    let mut inserted = String::new();

    let mut iter = runs.into_iter().peekable();
    while let Some((operation, text)) = iter.next() {
        match operation {
            DiffOperation::Delete => deleted.push_str(&text),
            DiffOperation::Insert => inserted.push_str(&text),
            DiffOperation::Equal => {
                let between_edits = (!deleted.is_empty() || !inserted.is_empty())
                    && iter.peek().is_some();
                if between_edits && text.chars().count() < MIN_EQUAL_RUN {
                    deleted.push_str(&text);
                    inserted.push_str(&text);
                } else {
                    flush_edits(&mut out, &mut deleted, &mut inserted);
                    push_equal(&mut out, text);
                }
            }
        }
    }
    flush_edits(&mut out, &mut deleted, &mut inserted);
    out
}

fn flush_edits(out: &mut Vec<(DiffOperation, String)>, deleted: &mut String, inserted: &mut String) {
    if !deleted.is_empty() {
        out.push((DiffOperation::Delete, std::mem::take(deleted)));
    }
    if !inserted.is_empty() {
        out.push((DiffOperation::Insert, std::mem::take(inserted)));
    }
}

fn push_equal(out: &mut Vec<(DiffOperation, String)>, text: String) {
    if let Some((DiffOperation::Equal, existing)) = out.last_mut() {
        existing.push_str(&text);
        return;
    }
    out.push((DiffOperation::Equal, text));
}

/// Assign cumulative character offsets and line numbers to the final runs.
fn assign_ranges(runs: Vec<(DiffOperation, String)>) -> Vec<DiffBlock> {
    let mut offset = 0;
    let mut line = 0;
    runs.into_iter()
        .map(|(operation, content)| {
            let width = content.chars().count();
            let newlines = content.matches('\n').count();
            let block = DiffBlock {
                operation,
                start_line: line,
                start_offset: offset,
                end_line: line + newlines,
                end_offset: offset + width,
                content,
            };
            offset += width;
            line += newlines;
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only_edit() {
        let blocks = diff("hello", "hello world");

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].operation, DiffOperation::Equal);
        assert_eq!(blocks[0].content, "hello");
        assert_eq!((blocks[0].start_offset, blocks[0].end_offset), (0, 5));
        assert_eq!(blocks[1].operation, DiffOperation::Insert);
        assert_eq!(blocks[1].content, " world");
        assert_eq!((blocks[1].start_offset, blocks[1].end_offset), (5, 11));
    }

    #[test]
    fn test_full_rewrite_is_delete_then_insert() {
        let blocks = diff("Some random content", "Content totally changed by user");

        assert_eq!(blocks.first().map(|b| b.operation), Some(DiffOperation::Delete));
        assert!(blocks.iter().any(|b| b.operation == DiffOperation::Insert));
        assert_eq!(reconstruct_previous(&blocks), "Some random content");
        assert_eq!(reconstruct_new(&blocks), "Content totally changed by user");
    }

    #[test]
    fn test_round_trip_both_directions() {
        let cases = [
            ("", ""),
            ("", "fresh content"),
            ("stale content", ""),
            ("same text", "same text"),
            ("line one\nline two\n", "line one\nline 2\nline three\n"),
            ("héllo wörld", "héllo brave wörld"),
            ("abcdef", "abXdef"),
        ];

        for (previous, new) in cases {
            let blocks = diff(previous, new);
            assert_eq!(reconstruct_previous(&blocks), previous, "previous for {previous:?} -> {new:?}");
            assert_eq!(reconstruct_new(&blocks), new, "new for {previous:?} -> {new:?}");
        }
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let a = diff("the quick brown fox", "the slow brown cat");
        let b = diff("the quick brown fox", "the slow brown cat");
        assert_eq!(a, b);
    }

    #[test]
    fn test_ranges_are_contiguous_and_well_formed() {
        let blocks = diff("one\ntwo\nthree", "one\n2\nthree\nfour");

        let mut offset = 0;
        for block in &blocks {
            assert!(block.is_well_formed());
            assert_eq!(block.start_offset, offset);
            offset = block.end_offset;
        }
    }

    #[test]
    fn test_line_numbers_count_newlines() {
        let blocks = diff("first line", "first line\nsecond line");

        assert_eq!(blocks.len(), 2);
        let insert = &blocks[1];
        assert_eq!(insert.content, "\nsecond line");
        assert_eq!(insert.start_line, 0);
        assert_eq!(insert.end_line, 1);
    }

    #[test]
    fn test_short_equal_runs_fold_into_edits() {
        // The single common "d" between edits should not survive as its own
        // equal block.
        let blocks = diff("abcd", "dxyz");

        assert!(blocks
            .iter()
            .all(|b| b.operation != DiffOperation::Equal || b.content.chars().count() >= MIN_EQUAL_RUN));
        assert_eq!(reconstruct_previous(&blocks), "abcd");
        assert_eq!(reconstruct_new(&blocks), "dxyz");
    }

    #[test]
    fn test_identical_content_is_single_equal_block() {
        let blocks = diff("unchanged", "unchanged");

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].operation, DiffOperation::Equal);
        assert_eq!(blocks[0].content, "unchanged");
    }
}
