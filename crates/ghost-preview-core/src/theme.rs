/// Whether the host editor is running a dark or a light theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

/// The concrete color set used for background/foreground/diff highlighting.
///
/// Always fully populated; there is no partial palette anywhere in the
/// pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: String,
    pub foreground: String,
    pub modified_background: String,
    pub added_background: String,
    pub removed_background: String,
    pub border: String,
    pub highlighted_background: String,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#d4d4d4".to_string(),
            modified_background: "#33333333".to_string(),
            added_background: "rgba(107, 166, 205, 0.2)".to_string(),
            removed_background: "rgba(248, 113, 133, 0.2)".to_string(),
            border: "#3c3c3c".to_string(),
            highlighted_background: "#264f78".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#24292e".to_string(),
            modified_background: "#dddddd30".to_string(),
            added_background: "rgba(107, 166, 205, 0.15)".to_string(),
            removed_background: "rgba(248, 113, 133, 0.15)".to_string(),
            border: "#e1e4e8".to_string(),
            highlighted_background: "#e7f3ff".to_string(),
        }
    }

    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Dark => Self::dark(),
            ThemeKind::Light => Self::light(),
        }
    }
}

/// Editor theme names this crate knows about, with the palette kind each one
/// implies. Lookup misses fall back to the caller-reported kind, so unknown
/// themes still resolve.
pub const KNOWN_THEMES: &[(&str, ThemeKind)] = &[
    ("Dark+ (default dark)", ThemeKind::Dark),
    ("Dark Modern", ThemeKind::Dark),
    ("Dark (Visual Studio)", ThemeKind::Dark),
    ("Ayu Dark", ThemeKind::Dark),
    ("One Dark Pro", ThemeKind::Dark),
    ("Monokai", ThemeKind::Dark),
    ("Material Theme Darker", ThemeKind::Dark),
    ("Solarized Dark", ThemeKind::Dark),
    ("Gruvbox Dark Hard", ThemeKind::Dark),
    ("Gruvbox Dark Medium", ThemeKind::Dark),
    ("Gruvbox Dark Soft", ThemeKind::Dark),
    ("GitHub Dark", ThemeKind::Dark),
    ("GitHub Dark Default", ThemeKind::Dark),
    ("GitHub Dark Dimmed", ThemeKind::Dark),
    ("GitHub Dark High Contrast", ThemeKind::Dark),
    ("Everforest Dark", ThemeKind::Dark),
    ("Vitesse Dark", ThemeKind::Dark),
    ("Min Dark", ThemeKind::Dark),
    ("Slack Dark", ThemeKind::Dark),
    ("Light+ (default light)", ThemeKind::Light),
    ("Light Modern", ThemeKind::Light),
    ("Light (Visual Studio)", ThemeKind::Light),
    ("GitHub Light", ThemeKind::Light),
    ("GitHub Light Default", ThemeKind::Light),
    ("GitHub Light High Contrast", ThemeKind::Light),
    ("Solarized Light", ThemeKind::Light),
    ("One Light", ThemeKind::Light),
    ("Quiet Light", ThemeKind::Light),
    ("Material Theme Lighter", ThemeKind::Light),
    ("Vitesse Light", ThemeKind::Light),
    ("Min Light", ThemeKind::Light),
];

/// Resolves a host theme to a concrete palette.
///
/// Exact name match first, then a case-insensitive match on the first word of
/// each known theme name, then the two-entry default for `kind`. Never fails.
pub fn resolve(kind: ThemeKind, name: &str) -> ThemeColors {
    if let Some((_, known_kind)) = KNOWN_THEMES.iter().find(|(known, _)| *known == name) {
        return ThemeColors::for_kind(*known_kind);
    }

    let lower = name.to_lowercase();
    for (known, known_kind) in KNOWN_THEMES {
        let first_word = known
            .split(' ')
            .next()
            .unwrap_or(known)
            .to_lowercase();
        if lower.contains(&first_word) {
            return ThemeColors::for_kind(*known_kind);
        }
    }

    ThemeColors::for_kind(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_name_wins_over_kind() {
        let colors = resolve(ThemeKind::Dark, "One Light");
        assert_eq!(colors, ThemeColors::light());
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let colors = resolve(ThemeKind::Light, "my gruvbox variant");
        assert_eq!(colors, ThemeColors::dark());
    }

    #[test]
    fn unknown_theme_falls_back_to_kind() {
        let colors = resolve(ThemeKind::Dark, "Totally Unknown Theme");
        assert_eq!(colors, ThemeColors::dark());
        assert!(!colors.background.is_empty());
        assert!(!colors.highlighted_background.is_empty());

        let colors = resolve(ThemeKind::Light, "Totally Unknown Theme");
        assert_eq!(colors, ThemeColors::light());
    }
}
