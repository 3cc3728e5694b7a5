//! Fuses syntax tokens with diff ranges into colored span markup.
//!
//! Tokens are split at every diff-range boundary that falls inside them; each
//! sub-segment keeps its token's text color and, when governed by a
//! non-unchanged range, gains a background fill plus a class tag naming the
//! diff kind. One `<span class="line">` container is emitted per source line,
//! containers joined by a bare newline.

use ghost_preview_core::range::BackgroundRange;
use ghost_preview_core::range::DiffKind;
use ghost_preview_core::theme::ThemeColors;
use ghost_preview_syntax::CodeTokenizer;
use ghost_preview_syntax::Token;
use ghost_preview_syntax::TokenizeError;

use crate::escape::escape_xml;

/// Tokenizes `code` and renders diff-aware span markup.
///
/// Tokenizer failures propagate untouched; the caller is expected to fall
/// back to an unhighlighted render.
pub fn highlight(
    tokenizer: &dyn CodeTokenizer,
    code: &str,
    language: Option<&str>,
    ranges: &[BackgroundRange],
    colors: &ThemeColors,
) -> Result<String, TokenizeError> {
    let lines = tokenizer.tokenize(language, code)?;
    Ok(render_lines(&lines, ranges, colors))
}

fn render_lines(lines: &[Vec<Token>], ranges: &[BackgroundRange], colors: &ThemeColors) -> String {
    let mut out = String::from("<pre class=\"code\"><code>");
    // Char offset into the newline-joined text; line breaks count as one.
    let mut offset = 0usize;

    for (line_index, line) in lines.iter().enumerate() {
        out.push_str("<span class=\"line\">");

        for token in line {
            let token_start = offset;
            let token_end = offset + token.content.chars().count();
            let color = token.color.as_deref().unwrap_or(&colors.foreground);

            let overlaps = ranges
                .iter()
                .any(|r| r.start < token_end && r.end > token_start);
            if overlaps {
                render_token_segments(&mut out, &token.content, color, token_start, ranges, colors);
            } else {
                push_plain_span(&mut out, &token.content, color);
            }

            offset = token_end;
        }

        out.push_str("</span>");
        if line_index < lines.len() - 1 {
            out.push('\n');
            offset += 1;
        }
    }

    out.push_str("</code></pre>");
    out
}

/// Splits one token's text at the boundaries of every range that overlaps it.
fn render_token_segments(
    out: &mut String,
    text: &str,
    color: &str,
    offset: usize,
    ranges: &[BackgroundRange],
    colors: &ThemeColors,
) {
    let starts = char_starts(text);
    let len = starts.len() - 1;
    let mut current = 0usize;

    while current < len {
        let global = offset + current;

        if let Some(range) = ranges.iter().find(|r| r.start <= global && r.end > global) {
            let range_start = range.start.saturating_sub(offset);
            let range_end = (range.end - offset).min(len);

            if current < range_start {
                push_plain_span(out, &text[starts[current]..starts[range_start]], color);
            }

            let seg_start = current.max(range_start);
            let segment = &text[starts[seg_start]..starts[range_end]];
            match range.kind {
                DiffKind::Unchanged => push_plain_span(out, segment, color),
                DiffKind::Added | DiffKind::Removed | DiffKind::Modified => {
                    push_tagged_span(out, segment, color, range.kind, colors);
                }
            }

            current = range_end;
        } else {
            // No governing range here: merge forward up to the next modified
            // range (narrower than "any range" on purpose).
            let next = ranges
                .iter()
                .filter(|r| r.start > global && r.kind == DiffKind::Modified)
                .map(|r| r.start - offset)
                .min()
                .unwrap_or(len)
                .min(len);
            push_plain_span(out, &text[starts[current]..starts[next]], color);
            current = next;
        }
    }
}

fn push_plain_span(out: &mut String, text: &str, color: &str) {
    out.push_str("<span style=\"color:");
    out.push_str(color);
    out.push_str("\">");
    out.push_str(&escape_xml(text));
    out.push_str("</span>");
}

fn push_tagged_span(
    out: &mut String,
    text: &str,
    color: &str,
    kind: DiffKind,
    colors: &ThemeColors,
) {
    out.push_str("<span class=\"");
    out.push_str(kind.css_class());
    out.push_str("\" style=\"color:");
    out.push_str(color);
    out.push_str(";background-color:");
    out.push_str(&colors.modified_background);
    out.push_str("\">");
    out.push_str(&escape_xml(text));
    out.push_str("</span>");
}

/// Byte offset of each char boundary plus the trailing length.
fn char_starts(s: &str) -> Vec<usize> {
    let mut out: Vec<usize> = Vec::with_capacity(s.len() + 1);
    for (idx, _) in s.char_indices() {
        out.push(idx);
    }
    out.push(s.len());
    out
}
