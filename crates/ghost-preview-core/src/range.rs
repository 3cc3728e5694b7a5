/// Classification of a run of characters in the new text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffKind {
    Unchanged,
    Added,
    Removed,
    Modified,
}

impl DiffKind {
    /// CSS class used to tag non-unchanged segments in the span markup.
    pub fn css_class(self) -> &'static str {
        match self {
            DiffKind::Unchanged => "diff-unchanged",
            DiffKind::Added => "diff-added",
            DiffKind::Removed => "diff-removed",
            DiffKind::Modified => "diff-modified",
        }
    }

    /// Inverse of [`css_class`](Self::css_class) for a single class token.
    pub fn from_class_token(token: &str) -> Option<DiffKind> {
        match token {
            "diff-unchanged" => Some(DiffKind::Unchanged),
            "diff-added" => Some(DiffKind::Added),
            "diff-removed" => Some(DiffKind::Removed),
            "diff-modified" => Some(DiffKind::Modified),
            _ => None,
        }
    }
}

/// A half-open `[start, end)` interval over the new text, in character
/// offsets, with a line break counting as one offset.
///
/// The full set produced by the classifier for non-empty new text is sorted,
/// mutually non-overlapping, and covers `[0, char_count)` exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundRange {
    pub start: usize,
    pub end: usize,
    pub kind: DiffKind,
}

impl BackgroundRange {
    pub fn new(start: usize, end: usize, kind: DiffKind) -> Self {
        Self { start, end, kind }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}
