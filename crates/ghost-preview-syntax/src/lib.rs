//! The tokenizer seam of the preview pipeline.
//!
//! Tokenizers are an external oracle: given code and a language, they return
//! per-line ordered token lists whose concatenated contents equal each line
//! exactly. Token boundaries are purely syntactic and carry no diff
//! information.

use std::fmt;

#[cfg(feature = "syntect")]
mod syntect;

#[cfg(feature = "syntect")]
pub use syntect::SyntectTokenizer;

/// A minimal syntactically-colored substring of one source line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    /// CSS color (`#rrggbb`); `None` means the theme foreground.
    pub color: Option<String>,
}

impl Token {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: None,
        }
    }

    pub fn colored(content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            color: Some(color.into()),
        }
    }
}

/// Error raised by a tokenizer backend. Callers of the pipeline are expected
/// to catch this and fall back to an unhighlighted render.
#[derive(Debug)]
pub enum TokenizeError {
    Backend(String),
}

impl fmt::Display for TokenizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizeError::Backend(msg) => write!(f, "tokenizer backend failed: {msg}"),
        }
    }
}

impl std::error::Error for TokenizeError {}

/// Splits code into per-line token lists.
///
/// Contract: for every line of `code` (split on `'\n'`), the returned tokens
/// concatenate to that line exactly, and the outer vec has one entry per
/// line. Unknown languages degrade to uncolored tokens rather than failing.
pub trait CodeTokenizer {
    fn tokenize(&self, language: Option<&str>, code: &str) -> Result<Vec<Vec<Token>>, TokenizeError>;
}

/// Fallback tokenizer: one uncolored token per line.
pub struct PlainTokenizer;

impl CodeTokenizer for PlainTokenizer {
    fn tokenize(
        &self,
        _language: Option<&str>,
        code: &str,
    ) -> Result<Vec<Vec<Token>>, TokenizeError> {
        Ok(code
            .split('\n')
            .map(|line| vec![Token::plain(line)])
            .collect())
    }
}

/// Maps an editor language id to a token the tokenizer backend understands.
///
/// Ids without a syntect grammar in the default set map to themselves and
/// degrade to plain text inside the backend.
pub fn language_for_id(id: &str) -> &str {
    match id {
        "typescript" | "typescriptreact" => "js",
        "javascript" | "javascriptreact" => "js",
        "csharp" => "cs",
        "shellscript" => "bash",
        "objective-c" => "objc",
        "jsonc" => "json",
        "plaintext" => "txt",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tokenizer_preserves_every_line() {
        let code = "fn main() {\n    let x = 1;\n}";
        let lines = PlainTokenizer.tokenize(None, code).unwrap();
        assert_eq!(lines.len(), 3);
        for (line, tokens) in code.split('\n').zip(&lines) {
            let joined: String = tokens.iter().map(|t| t.content.as_str()).collect();
            assert_eq!(joined, line);
            assert!(tokens.iter().all(|t| t.color.is_none()));
        }
    }

    #[test]
    fn plain_tokenizer_keeps_empty_lines() {
        let lines = PlainTokenizer.tokenize(None, "a\n\nb").unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], vec![Token::plain("")]);
    }

    #[test]
    fn language_ids_map_to_backend_tokens() {
        assert_eq!(language_for_id("typescript"), "js");
        assert_eq!(language_for_id("shellscript"), "bash");
        assert_eq!(language_for_id("rust"), "rust");
    }
}
