use std::sync::Arc;
use std::sync::OnceLock;

use ghost_preview_core::theme::ThemeKind;
use syntect::easy::HighlightLines;
use syntect::highlighting::Color;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

use crate::CodeTokenizer;
use crate::Token;
use crate::TokenizeError;
use crate::language_for_id;

/// Editor theme names mapped to the bundled syntect themes.
const SYNTECT_THEMES: &[(&str, &str)] = &[
    ("Dark+ (default dark)", "base16-ocean.dark"),
    ("Dark Modern", "base16-ocean.dark"),
    ("Dark (Visual Studio)", "base16-ocean.dark"),
    ("Ayu Dark", "base16-mocha.dark"),
    ("One Dark Pro", "base16-eighties.dark"),
    ("Monokai", "base16-eighties.dark"),
    ("Solarized Dark", "Solarized (dark)"),
    ("GitHub Dark", "base16-ocean.dark"),
    ("Light+ (default light)", "InspiredGitHub"),
    ("Light Modern", "InspiredGitHub"),
    ("GitHub Light", "InspiredGitHub"),
    ("Quiet Light", "InspiredGitHub"),
    ("Solarized Light", "Solarized (light)"),
    ("One Light", "base16-ocean.light"),
];

const DEFAULT_DARK: &str = "base16-ocean.dark";
const DEFAULT_LIGHT: &str = "InspiredGitHub";

/// Process-wide grammar and theme definitions.
///
/// Loading the default syntax set is the only expensive step in the pipeline,
/// so it happens once. The cache is an explicit value rather than a global:
/// tests can build their own, while production callers share one through
/// [`GrammarCache::shared`]. After construction it is read-only and safe to
/// use from any number of threads.
pub struct GrammarCache {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl GrammarCache {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Lazily initialized shared cache; initialization is idempotent and
    /// concurrent callers all observe the same instance.
    pub fn shared() -> Arc<GrammarCache> {
        static SHARED: OnceLock<Arc<GrammarCache>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(GrammarCache::new())).clone()
    }

    fn theme_for(&self, kind: ThemeKind, name: &str) -> Theme {
        let key = syntect_theme_name(kind, name);
        self.theme_set
            .themes
            .get(key)
            .cloned()
            .or_else(|| self.theme_set.themes.values().next().cloned())
            .unwrap_or_default()
    }
}

impl Default for GrammarCache {
    fn default() -> Self {
        Self::new()
    }
}

fn syntect_theme_name(kind: ThemeKind, name: &str) -> &'static str {
    if let Some((_, key)) = SYNTECT_THEMES.iter().find(|(known, _)| *known == name) {
        return key;
    }

    let lower = name.to_lowercase();
    for (known, key) in SYNTECT_THEMES {
        let first_word = known.split(' ').next().unwrap_or(known).to_lowercase();
        if lower.contains(&first_word) {
            return key;
        }
    }

    match kind {
        ThemeKind::Dark => DEFAULT_DARK,
        ThemeKind::Light => DEFAULT_LIGHT,
    }
}

/// Syntect-backed tokenizer for one resolved editor theme.
pub struct SyntectTokenizer {
    cache: Arc<GrammarCache>,
    theme: Theme,
}

impl SyntectTokenizer {
    /// Uses the shared grammar cache; see [`GrammarCache::shared`].
    pub fn new(kind: ThemeKind, theme_name: &str) -> Self {
        Self::with_cache(GrammarCache::shared(), kind, theme_name)
    }

    pub fn with_cache(cache: Arc<GrammarCache>, kind: ThemeKind, theme_name: &str) -> Self {
        let theme = cache.theme_for(kind, theme_name);
        Self { cache, theme }
    }

    fn syntax_for(&self, language: Option<&str>) -> &SyntaxReference {
        if let Some(lang) = language {
            let token = language_for_id(lang);
            if let Some(syntax) = self.cache.syntax_set.find_syntax_by_extension(token) {
                return syntax;
            }
            if let Some(syntax) = self.cache.syntax_set.find_syntax_by_token(token) {
                return syntax;
            }
        }
        self.cache.syntax_set.find_syntax_plain_text()
    }
}

impl CodeTokenizer for SyntectTokenizer {
    fn tokenize(
        &self,
        language: Option<&str>,
        code: &str,
    ) -> Result<Vec<Vec<Token>>, TokenizeError> {
        let syntax = self.syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        let mut out: Vec<Vec<Token>> = Vec::new();
        for line in code.split('\n') {
            let regions = highlighter
                .highlight_line(line, &self.cache.syntax_set)
                .map_err(|err| TokenizeError::Backend(err.to_string()))?;

            let mut tokens: Vec<Token> = Vec::with_capacity(regions.len());
            for (style, content) in regions {
                if content.is_empty() {
                    continue;
                }
                tokens.push(Token::colored(content, hex_color(style.foreground)));
            }
            if tokens.is_empty() {
                tokens.push(Token::plain(line));
            }
            out.push(tokens);
        }
        Ok(out)
    }
}

fn hex_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_concatenate_to_each_line() {
        let tokenizer = SyntectTokenizer::new(ThemeKind::Dark, "Dark Modern");
        let code = "fn main() {\n    let x = \"hi\";\n}";
        let lines = tokenizer.tokenize(Some("rust"), code).unwrap();
        assert_eq!(lines.len(), 3);
        for (line, tokens) in code.split('\n').zip(&lines) {
            let joined: String = tokens.iter().map(|t| t.content.as_str()).collect();
            assert_eq!(joined, line);
        }
    }

    #[test]
    fn unknown_language_degrades_to_plain_text() {
        let tokenizer = SyntectTokenizer::new(ThemeKind::Dark, "Dark Modern");
        let lines = tokenizer
            .tokenize(Some("definitely-not-a-language"), "hello world")
            .unwrap();
        let joined: String = lines[0].iter().map(|t| t.content.as_str()).collect();
        assert_eq!(joined, "hello world");
    }

    #[test]
    fn shared_cache_is_a_single_instance() {
        let a = GrammarCache::shared();
        let b = GrammarCache::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn theme_name_resolution_tiers() {
        assert_eq!(
            syntect_theme_name(ThemeKind::Dark, "Solarized Dark"),
            "Solarized (dark)"
        );
        assert_eq!(
            syntect_theme_name(ThemeKind::Light, "solarized light (patched)"),
            "Solarized (dark)"
        );
        assert_eq!(
            syntect_theme_name(ThemeKind::Light, "Totally Unknown Theme"),
            DEFAULT_LIGHT
        );
    }
}
