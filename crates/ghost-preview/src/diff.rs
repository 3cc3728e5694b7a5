//! Classifies the characters of a new text against an original.
//!
//! Hybrid approach: a word-granularity pass keeps unchanged regions at word
//! boundaries for readability, then removal/addition pairs are refined down
//! to character precision. The output is anchored to the new text only;
//! removed content that has no replacement never produces a range.

use ghost_preview_core::range::BackgroundRange;
use ghost_preview_core::range::DiffKind;
use similar::ChangeTag;
use similar::DiffTag;
use similar::TextDiff;

/// Computes ordered, gap-free, non-overlapping ranges over `new`, each tagged
/// unchanged/added/modified.
///
/// For non-empty `new`, the returned ranges are sorted and their union covers
/// `[0, char_count(new))` exactly once.
pub fn classify(original: &str, new: &str) -> Vec<BackgroundRange> {
    if original.is_empty() && new.is_empty() {
        return Vec::new();
    }
    if original.is_empty() {
        return vec![BackgroundRange::new(
            0,
            new.chars().count(),
            DiffKind::Added,
        )];
    }
    if new.is_empty() {
        return Vec::new();
    }

    let segments = word_segments(original, new);
    let mut ranges: Vec<BackgroundRange> = Vec::new();
    let mut cursor = 0usize;

    let mut i = 0;
    while i < segments.len() {
        let segment = &segments[i];
        let len = segment.value.chars().count();
        match segment.tag {
            ChangeTag::Equal => {
                ranges.push(BackgroundRange::new(
                    cursor,
                    cursor + len,
                    DiffKind::Unchanged,
                ));
                cursor += len;
            }
            ChangeTag::Insert => {
                ranges.push(BackgroundRange::new(cursor, cursor + len, DiffKind::Added));
                cursor += len;
            }
            ChangeTag::Delete => {
                if let Some(next) = segments.get(i + 1)
                    && next.tag == ChangeTag::Insert
                {
                    cursor = process_word_pair(&segment.value, &next.value, cursor, &mut ranges);
                    i += 1;
                }
                // A removal without a following addition is not shown.
            }
        }
        i += 1;
    }

    ranges
}

struct Segment {
    tag: ChangeTag,
    value: String,
}

/// Word-granularity diff collapsed into maximal same-tag segments. The
/// non-removed segments concatenate, in order, to exactly `new`.
fn word_segments(original: &str, new: &str) -> Vec<Segment> {
    let diff = TextDiff::from_words(original, new);
    let mut segments: Vec<Segment> = Vec::new();
    for change in diff.iter_all_changes() {
        let value = change.value();
        if let Some(last) = segments.last_mut()
            && last.tag == change.tag()
        {
            last.value.push_str(value);
            continue;
        }
        segments.push(Segment {
            tag: change.tag(),
            value: value.to_string(),
        });
    }
    segments
}

/// Resolves a removal/addition word pair into ranges over the added text and
/// returns the advanced cursor.
fn process_word_pair(
    removed: &str,
    added: &str,
    start: usize,
    out: &mut Vec<BackgroundRange>,
) -> usize {
    let removed_len = removed.chars().count();
    let added_len = added.chars().count();

    // Suffix additions: "abc" -> "abcd".
    if added.starts_with(removed) {
        out.push(BackgroundRange::new(
            start,
            start + removed_len,
            DiffKind::Unchanged,
        ));
        if added_len > removed_len {
            out.push(BackgroundRange::new(
                start + removed_len,
                start + added_len,
                DiffKind::Added,
            ));
        }
        return start + added_len;
    }

    // Prefix additions: "bcd" -> "abcd".
    if added.ends_with(removed) {
        let prefix_len = added_len - removed_len;
        if prefix_len > 0 {
            out.push(BackgroundRange::new(
                start,
                start + prefix_len,
                DiffKind::Added,
            ));
        }
        out.push(BackgroundRange::new(
            start + prefix_len,
            start + added_len,
            DiffKind::Unchanged,
        ));
        return start + added_len;
    }

    if should_refine(removed_len, added_len) {
        refine_with_char_diff(removed, added, start, out);
        return start + added_len;
    }

    // Large word change, treat as a single modification.
    out.push(BackgroundRange::new(
        start,
        start + added_len,
        DiffKind::Modified,
    ));
    start + added_len
}

/// Small, similar-length words get character-level refinement.
fn should_refine(removed_len: usize, added_len: usize) -> bool {
    removed_len <= 10 && added_len <= 10 && removed_len.abs_diff(added_len) <= 2
}

fn refine_with_char_diff(removed: &str, added: &str, start: usize, out: &mut Vec<BackgroundRange>) {
    let removed_chars: Vec<char> = removed.chars().collect();
    let added_chars: Vec<char> = added.chars().collect();

    // Index-aligned comparison for short words of near-equal length. This
    // re-checks a looser variant of `should_refine` on purpose; the two
    // conditions are tuned independently.
    if removed_chars.len().min(added_chars.len()) <= 10
        && removed_chars.len().abs_diff(added_chars.len()) <= 3
    {
        let max_len = removed_chars.len().max(added_chars.len());
        for i in 0..max_len {
            // Positions past the added word do not exist in the new text.
            let Some(new_ch) = added_chars.get(i) else {
                break;
            };
            let kind = if removed_chars.get(i) == Some(new_ch) {
                DiffKind::Unchanged
            } else {
                DiffKind::Modified
            };
            out.push(BackgroundRange::new(start + i, start + i + 1, kind));
        }
        return;
    }

    // Otherwise fall back to a full character diff. Inserted characters are
    // modified, not added: this is a word replacement.
    let diff = TextDiff::from_chars(removed, added);
    let mut position = start;
    for op in diff.ops() {
        let len = op.new_range().len();
        match op.tag() {
            DiffTag::Equal => {
                out.push(BackgroundRange::new(
                    position,
                    position + len,
                    DiffKind::Unchanged,
                ));
                position += len;
            }
            DiffTag::Insert | DiffTag::Replace => {
                out.push(BackgroundRange::new(
                    position,
                    position + len,
                    DiffKind::Modified,
                ));
                position += len;
            }
            DiffTag::Delete => {}
        }
    }
}
