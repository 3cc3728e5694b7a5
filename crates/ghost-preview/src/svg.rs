//! Walks parsed markup and emits a deterministic SVG document.
//!
//! A horizontal cursor tracks estimated glyph advances per line; background
//! rectangles for diff-tagged segments are derived from the same width
//! estimator as the markup's overlap arithmetic, so every highlight edge
//! coincides with the character range that produced it.

use ghost_preview_core::metrics;
use ghost_preview_core::range::DiffKind;
use ghost_preview_core::theme::ThemeColors;

use crate::dom;
use crate::dom::RenderError;
use crate::dom::RenderNode;
use crate::escape::escape_xml;

/// Immutable per-render layout configuration.
#[derive(Clone, Debug)]
pub struct SvgRenderOptions {
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: Option<String>,
    pub letter_spacing: f64,
    pub line_height: f64,
    pub theme_colors: ThemeColors,
}

/// Renders span markup to an SVG string. Pure; no state survives a call.
pub struct SvgRenderer<'a> {
    markup: &'a str,
    options: SvgRenderOptions,
}

impl<'a> SvgRenderer<'a> {
    pub fn new(markup: &'a str, options: SvgRenderOptions) -> Self {
        Self { markup, options }
    }

    pub fn render(&self) -> Result<String, RenderError> {
        let (texts, line_backgrounds, character_backgrounds) = self.svg_content()?;

        // Height follows the raw markup's separator count, not the parsed
        // line containers. The markup layer emits exactly one "\n" between
        // containers, so the two agree; this is a precondition, not a check.
        let line_count = self.markup.split('\n').count();
        let height = line_count as f64 * self.options.line_height;

        let mut out = String::new();
        out.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" shape-rendering=\"crispEdges\">\n<g>\n",
            self.options.width, height
        ));
        out.push_str(&format!(
            "<rect x=\"0\" y=\"0\" rx=\"10\" ry=\"10\" width=\"{}\" height=\"{}\" fill=\"{}\" shape-rendering=\"crispEdges\" />\n",
            self.options.width, height, self.options.theme_colors.background
        ));
        for rect in &line_backgrounds {
            out.push_str(rect);
            out.push('\n');
        }
        for rect in &character_backgrounds {
            out.push_str(rect);
            out.push('\n');
        }
        // Text goes last so highlight rectangles never occlude it.
        for text in &texts {
            out.push_str(text);
            out.push('\n');
        }
        out.push_str("</g>\n</svg>");
        Ok(out)
    }

    fn svg_content(&self) -> Result<(Vec<String>, Vec<String>, Vec<String>), RenderError> {
        let tree = dom::parse(self.markup)?;
        let lines = tree.elements_with_class("line");

        let mut texts: Vec<String> = Vec::with_capacity(lines.len());
        let mut line_backgrounds: Vec<String> = Vec::with_capacity(lines.len());
        let mut character_backgrounds: Vec<String> = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let line_top = index as f64 * self.options.line_height;
            let line_y = line_top + self.options.line_height / 2.0;

            line_backgrounds.push(format!(
                "<rect x=\"0\" y=\"{}\" width=\"100%\" height=\"{}\" fill=\"{}\" shape-rendering=\"crispEdges\" />",
                line_top, self.options.line_height, self.options.theme_colors.background
            ));

            let mut x = 0.0f64;
            let mut spans = String::new();

            let RenderNode::Element { children, .. } = line else {
                continue;
            };
            for child in children {
                match child {
                    RenderNode::Text(text) => {
                        let width = metrics::text_width(text, self.options.font_size);
                        spans.push_str(&format!(
                            "<tspan xml:space=\"preserve\">{}</tspan>",
                            escape_xml(text)
                        ));
                        x += width;
                    }
                    RenderNode::Element { class, style, .. } => {
                        let color = style_value(style, "color");
                        let background = style_value(style, "background-color");
                        let content = child.text_content();
                        let width = metrics::text_width(&content, self.options.font_size);

                        if let Some(kind) = diff_kind_for(class) {
                            character_backgrounds.push(format!(
                                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" shape-rendering=\"crispEdges\" />",
                                x,
                                line_top,
                                width,
                                self.options.line_height,
                                self.background_for(kind)
                            ));
                        } else if background.is_some() {
                            // Non-diff highlighted spans all share the
                            // theme's generic highlight color; the inline
                            // value is ignored on purpose.
                            character_backgrounds.push(format!(
                                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" shape-rendering=\"crispEdges\" />",
                                x,
                                line_top,
                                width,
                                self.options.line_height,
                                self.options.theme_colors.highlighted_background
                            ));
                        }

                        let fill = color
                            .map(|c| format!(" fill=\"{}\"", escape_xml(c)))
                            .unwrap_or_default();
                        spans.push_str(&format!(
                            "<tspan xml:space=\"preserve\"{}>{}</tspan>",
                            fill,
                            escape_xml(&content)
                        ));
                        x += width;
                    }
                }
            }

            let mut attrs = format!(
                "x=\"0\" y=\"{}\" font-family=\"{}\" font-size=\"{}\"",
                line_y,
                escape_xml(&self.options.font_family),
                self.options.font_size
            );
            if let Some(weight) = &self.options.font_weight {
                attrs.push_str(&format!(" font-weight=\"{}\"", escape_xml(weight)));
            }
            if self.options.letter_spacing != 0.0 {
                attrs.push_str(&format!(" letter-spacing=\"{}\"", self.options.letter_spacing));
            }
            texts.push(format!(
                "<text {attrs} xml:space=\"preserve\" dominant-baseline=\"central\" shape-rendering=\"crispEdges\">{spans}</text>"
            ));
        }

        Ok((texts, line_backgrounds, character_backgrounds))
    }

    fn background_for(&self, kind: DiffKind) -> &str {
        match kind {
            DiffKind::Added => &self.options.theme_colors.added_background,
            DiffKind::Removed => &self.options.theme_colors.removed_background,
            DiffKind::Unchanged | DiffKind::Modified => {
                &self.options.theme_colors.modified_background
            }
        }
    }
}

/// The diff kind a markup element is tagged with, if any. The most specific
/// tag wins: added over removed over modified; an unrecognized `diff-` tag
/// falls back to modified.
fn diff_kind_for(class: &str) -> Option<DiffKind> {
    if !class.split_whitespace().any(|t| t.starts_with("diff-")) {
        return None;
    }
    for kind in [DiffKind::Added, DiffKind::Removed, DiffKind::Modified] {
        if class.split_whitespace().any(|t| t == kind.css_class()) {
            return Some(kind);
        }
    }
    Some(DiffKind::Modified)
}

/// Value of one declaration in an inline style string. Tiny on purpose; the
/// markup layer only ever writes `color` and `background-color`.
fn style_value<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        if name.trim() == property {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff;
    use crate::markup;
    use ghost_preview_core::range::BackgroundRange;
    use ghost_preview_syntax::PlainTokenizer;

    fn options() -> SvgRenderOptions {
        SvgRenderOptions {
            width: 400.0,
            height: 50.0,
            font_size: 10.0,
            font_family: "monospace".to_string(),
            font_weight: None,
            letter_spacing: 0.0,
            line_height: 20.0,
            theme_colors: ThemeColors::dark(),
        }
    }

    fn markup_for(code: &str, ranges: &[BackgroundRange]) -> String {
        markup::highlight(&PlainTokenizer, code, None, ranges, &ThemeColors::dark()).unwrap()
    }

    #[test]
    fn style_value_separates_color_from_background() {
        let style = "color:#abcdef;background-color:#33333333";
        assert_eq!(style_value(style, "color"), Some("#abcdef"));
        assert_eq!(style_value(style, "background-color"), Some("#33333333"));
        assert_eq!(style_value("color:#fff", "background-color"), None);
    }

    #[test]
    fn diff_class_precedence_is_added_removed_modified() {
        assert_eq!(diff_kind_for("diff-added diff-modified"), Some(DiffKind::Added));
        assert_eq!(diff_kind_for("diff-removed"), Some(DiffKind::Removed));
        assert_eq!(diff_kind_for("diff-anything"), Some(DiffKind::Modified));
        assert_eq!(diff_kind_for("line"), None);
    }

    #[test]
    fn rendering_is_deterministic() {
        let markup = markup_for("abc", &[BackgroundRange::new(0, 3, DiffKind::Added)]);
        let first = SvgRenderer::new(&markup, options()).render().unwrap();
        let second = SvgRenderer::new(&markup, options()).render().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn height_comes_from_the_raw_markup_line_count() {
        let markup = markup_for("a\nb\nc", &[]);
        let svg = SvgRenderer::new(&markup, options()).render().unwrap();
        assert!(svg.contains("height=\"60\""), "three lines at 20px: {svg}");
    }

    #[test]
    fn added_segments_get_the_added_background_rect() {
        let markup = markup_for("abcd", &[
            BackgroundRange::new(0, 2, DiffKind::Unchanged),
            BackgroundRange::new(2, 4, DiffKind::Added),
        ]);
        let svg = SvgRenderer::new(&markup, options()).render().unwrap();
        let colors = ThemeColors::dark();
        assert!(svg.contains(&colors.added_background));
        // Cursor sits past "ab" when the added rect starts: 2 chars * 6px.
        assert!(svg.contains("<rect x=\"12\""));
    }

    #[test]
    fn untagged_background_spans_use_the_generic_highlight_color() {
        let markup = "<pre class=\"code\"><code><span class=\"line\"><span style=\"color:#ffffff;background-color:#123456\">hi</span></span></code></pre>";
        let svg = SvgRenderer::new(markup, options()).render().unwrap();
        let colors = ThemeColors::dark();
        assert!(svg.contains(&colors.highlighted_background));
        assert!(!svg.contains("#123456\" shape-rendering"));
    }

    #[test]
    fn rectangles_precede_text_in_document_order() {
        let markup = markup_for("abc", &[BackgroundRange::new(0, 3, DiffKind::Modified)]);
        let svg = SvgRenderer::new(&markup, options()).render().unwrap();
        let last_rect = svg.rfind("<rect").unwrap();
        let first_text = svg.find("<text").unwrap();
        assert!(last_rect < first_text);
    }

    #[test]
    fn text_runs_account_for_every_character() {
        let code = "fn main() {\n    let x = \"<&>\";\n}";
        let ranges = diff::classify("fn main() {}", code);
        let markup = markup_for(code, &ranges);
        let svg = SvgRenderer::new(&markup, options()).render().unwrap();

        // The SVG is itself well-formed markup; re-parse it and read back the
        // per-line text runs.
        let tree = crate::dom::parse(&svg).unwrap();
        let mut lines: Vec<String> = Vec::new();
        collect_texts(&tree, &mut lines);
        assert_eq!(lines.join("\n"), code);
    }

    fn collect_texts(node: &RenderNode, out: &mut Vec<String>) {
        if let RenderNode::Element { tag, .. } = node
            && tag == "text"
        {
            out.push(node.text_content());
            return;
        }
        if let RenderNode::Element { children, .. } = node {
            for child in children {
                collect_texts(child, out);
            }
        }
    }
}
