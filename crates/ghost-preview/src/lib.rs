//! Ghost suggestion previews: diff two text snapshots, syntax-highlight the
//! updated one, and render the result as a themed SVG image.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. [`diff::classify`] compares the snapshots and tags every character of
//!    the updated text with a [`DiffKind`].
//! 2. [`markup::highlight`] fuses tokenizer colors with those tags into span
//!    markup.
//! 3. [`svg::SvgRenderer`] lays the markup out with estimated text metrics
//!    and emits the SVG document.
//!
//! [`render_preview`] runs all three.
//!
//! ```
//! use ghost_preview::PlainTokenizer;
//! use ghost_preview::PreviewInput;
//! use ghost_preview::PreviewLayout;
//!
//! let preview = ghost_preview::render_preview(
//!     &PlainTokenizer,
//!     &PreviewInput {
//!         original: "let x = 1;".to_string(),
//!         updated: "let value = 1;".to_string(),
//!         ..PreviewInput::default()
//!     },
//!     &PreviewLayout::default(),
//! )
//! .unwrap();
//! assert!(preview.svg.starts_with("<svg"));
//! ```

pub mod diff;
pub mod dom;
pub mod markup;
pub mod preview;
pub mod svg;

mod escape;

pub use ghost_preview_core::metrics;
pub use ghost_preview_core::range::BackgroundRange;
pub use ghost_preview_core::range::DiffKind;
pub use ghost_preview_core::theme;
pub use ghost_preview_core::theme::ThemeColors;
pub use ghost_preview_core::theme::ThemeKind;
pub use ghost_preview_syntax::CodeTokenizer;
pub use ghost_preview_syntax::PlainTokenizer;
pub use ghost_preview_syntax::Token;
pub use ghost_preview_syntax::TokenizeError;
#[cfg(feature = "syntect")]
pub use ghost_preview_syntax::SyntectTokenizer;

pub use preview::Preview;
pub use preview::PreviewError;
pub use preview::PreviewInput;
pub use preview::PreviewLayout;
pub use preview::render_preview;
