//! Monospace glyph model used for all horizontal layout.
//!
//! Every stage that converts character counts into pixels goes through these
//! functions, so highlight rectangle edges always coincide with the character
//! offsets that produced them.

/// Estimated advance of a single glyph at `font_size`.
pub fn character_width(font_size: f64) -> f64 {
    font_size * 0.6
}

/// Estimated width of `text` rendered on one line.
pub fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * character_width(font_size)
}

/// Character count of the longest line in `text`.
pub fn max_line_chars(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
}

/// Width of the decoration container wrapping a rendered preview, with a
/// fixed 32px floor and 32px of horizontal padding.
pub fn container_width(text: &str, font_size: f64) -> f64 {
    let content = max_line_chars(text) as f64 * character_width(font_size);
    (content + 32.0).round().max(32.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn character_width_scales_with_font_size() {
        assert_eq!(character_width(10.0), 6.0);
        assert_eq!(text_width("abcd", 10.0), 24.0);
        assert_eq!(text_width("", 10.0), 0.0);
    }

    #[test]
    fn max_line_chars_picks_longest_line() {
        assert_eq!(max_line_chars(""), 0);
        assert_eq!(max_line_chars("ab\nabcde\nc"), 5);
    }

    #[test]
    fn container_width_has_floor_and_padding() {
        assert!(container_width("", 14.0) >= 32.0);
        assert!(container_width("hello", 14.0) >= 32.0);
        assert!(container_width("hello", 14.0) > text_width("hello", 14.0));
    }
}
