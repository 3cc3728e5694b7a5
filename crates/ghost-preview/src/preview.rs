//! End-to-end pipeline: snapshots in, themed SVG preview out.

use std::error::Error;
use std::fmt;

use ghost_preview_core::metrics;
use ghost_preview_core::theme;
use ghost_preview_core::theme::ThemeColors;
use ghost_preview_core::theme::ThemeKind;
use ghost_preview_syntax::CodeTokenizer;
use ghost_preview_syntax::TokenizeError;

use crate::diff;
use crate::dom::RenderError;
use crate::markup;
use crate::svg::SvgRenderOptions;
use crate::svg::SvgRenderer;

/// The two snapshots to compare, plus presentation hints.
#[derive(Clone, Debug, Default)]
pub struct PreviewInput {
    pub original: String,
    pub updated: String,
    /// Editor language identifier, e.g. `"typescript"`.
    pub language: Option<String>,
    pub theme_kind: ThemeKind,
    /// Editor theme name; falls back to `theme_kind` when absent or unknown.
    pub theme_name: Option<String>,
}

/// Font and line geometry the preview is laid out with.
#[derive(Clone, Debug)]
pub struct PreviewLayout {
    pub font_size: f64,
    pub font_family: String,
    pub line_height: f64,
}

impl Default for PreviewLayout {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            font_family: "monospace".to_string(),
            line_height: 20.0,
        }
    }
}

/// A rendered preview and the geometry it was laid out with.
#[derive(Clone, Debug)]
pub struct Preview {
    pub svg: String,
    pub colors: ThemeColors,
    pub width: f64,
    pub height: f64,
}

impl Preview {
    /// The SVG as a percent-encoded `data:image/svg+xml` URI.
    pub fn data_uri(&self) -> String {
        let mut out = String::with_capacity(self.svg.len() + 24);
        out.push_str("data:image/svg+xml,");
        for byte in self.svg.bytes() {
            match byte {
                b'A'..=b'Z'
                | b'a'..=b'z'
                | b'0'..=b'9'
                | b'-'
                | b'_'
                | b'.'
                | b'!'
                | b'~'
                | b'*'
                | b'\''
                | b'('
                | b')' => out.push(byte as char),
                _ => out.push_str(&format!("%{byte:02X}")),
            }
        }
        out
    }
}

#[derive(Debug)]
pub enum PreviewError {
    Tokenize(TokenizeError),
    Render(RenderError),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::Tokenize(err) => write!(f, "tokenize failed: {err}"),
            PreviewError::Render(err) => write!(f, "render failed: {err}"),
        }
    }
}

impl Error for PreviewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PreviewError::Tokenize(err) => Some(err),
            PreviewError::Render(err) => Some(err),
        }
    }
}

impl From<TokenizeError> for PreviewError {
    fn from(err: TokenizeError) -> Self {
        PreviewError::Tokenize(err)
    }
}

impl From<RenderError> for PreviewError {
    fn from(err: RenderError) -> Self {
        PreviewError::Render(err)
    }
}

/// Classifies the change, highlights the updated snapshot, and renders the
/// SVG preview in one pass.
pub fn render_preview(
    tokenizer: &dyn CodeTokenizer,
    input: &PreviewInput,
    layout: &PreviewLayout,
) -> Result<Preview, PreviewError> {
    let colors = match &input.theme_name {
        Some(name) => theme::resolve(input.theme_kind, name),
        None => ThemeColors::for_kind(input.theme_kind),
    };

    let ranges = diff::classify(&input.original, &input.updated);
    let markup = markup::highlight(
        tokenizer,
        &input.updated,
        input.language.as_deref(),
        &ranges,
        &colors,
    )?;

    let width = metrics::container_width(&input.updated, layout.font_size);
    let line_count = input.updated.split('\n').count();
    let height = line_count as f64 * layout.line_height;

    let svg = SvgRenderer::new(
        &markup,
        SvgRenderOptions {
            width,
            height,
            font_size: layout.font_size,
            font_family: layout.font_family.clone(),
            font_weight: None,
            letter_spacing: 0.0,
            line_height: layout.line_height,
            theme_colors: colors.clone(),
        },
    )
    .render()?;

    Ok(Preview {
        svg,
        colors,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_preview_syntax::PlainTokenizer;

    fn input(original: &str, updated: &str) -> PreviewInput {
        PreviewInput {
            original: original.to_string(),
            updated: updated.to_string(),
            language: None,
            theme_kind: ThemeKind::Dark,
            theme_name: None,
        }
    }

    #[test]
    fn renders_a_complete_preview() {
        let preview = render_preview(
            &PlainTokenizer,
            &input("let x = 1;", "let value = 1;"),
            &PreviewLayout::default(),
        )
        .unwrap();

        assert!(preview.svg.starts_with("<svg"));
        assert!(preview.svg.ends_with("</svg>"));
        assert_eq!(preview.height, 20.0);
        assert!(preview.width >= 32.0);
        assert_eq!(preview.colors.background, ThemeColors::dark().background);
    }

    #[test]
    fn geometry_tracks_the_updated_snapshot() {
        let preview = render_preview(
            &PlainTokenizer,
            &input("a", "first line\nsecond\nthird"),
            &PreviewLayout::default(),
        )
        .unwrap();

        // Three lines at the default 20px line height.
        assert_eq!(preview.height, 60.0);
        let expected = metrics::container_width("first line\nsecond\nthird", 14.0);
        assert_eq!(preview.width, expected);
    }

    #[test]
    fn theme_name_overrides_the_kind() {
        let preview = render_preview(
            &PlainTokenizer,
            &PreviewInput {
                theme_name: Some("Default Light+".to_string()),
                ..input("a", "b")
            },
            &PreviewLayout::default(),
        )
        .unwrap();
        assert_eq!(preview.colors.background, ThemeColors::light().background);
    }

    #[test]
    fn data_uri_is_percent_encoded() {
        let preview = Preview {
            svg: "<svg a=\"b\"/>".to_string(),
            colors: ThemeColors::dark(),
            width: 32.0,
            height: 20.0,
        };
        let uri = preview.data_uri();
        assert!(uri.starts_with("data:image/svg+xml,%3Csvg"));
        assert!(!uri.contains('<'));
        assert!(!uri.contains('"'));
        assert!(uri.contains("%22b%22"));
    }
}
