use serde::{Deserialize, Serialize};

/// One contiguous span of text classified by the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Position in the diff output. Only stable within one computation.
    pub sequence_index: u32,
    /// Whether the span is shared, inserted, or deleted.
    pub kind: HunkKind,
    /// Literal token span covered by the hunk, whitespace included.
    pub text: String,
}

impl Hunk {
    /// Convenience constructor.
    pub fn new(sequence_index: u32, kind: HunkKind, text: impl Into<String>) -> Self {
        Self {
            sequence_index,
            kind,
            text: text.into(),
        }
    }

    /// Whether the hunk is part of the old text.
    #[must_use]
    pub const fn on_old_side(&self) -> bool {
        matches!(self.kind, HunkKind::Unchanged | HunkKind::Deleted)
    }

    /// Whether the hunk is part of the new text.
    #[must_use]
    pub const fn on_new_side(&self) -> bool {
        matches!(self.kind, HunkKind::Unchanged | HunkKind::Inserted)
    }
}

/// Classification of a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunkKind {
    /// Text present on both sides.
    Unchanged,
    /// Text only present in the new version.
    Inserted,
    /// Text only present in the old version.
    Deleted,
}

impl HunkKind {
    /// Unchanged spans never take part in review decisions.
    #[must_use]
    pub const fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Rebuild the old text from an ordered hunk sequence.
pub fn old_text<'a>(hunks: impl IntoIterator<Item = &'a Hunk>) -> String {
    hunks
        .into_iter()
        .filter(|hunk| hunk.on_old_side())
        .map(|hunk| hunk.text.as_str())
        .collect()
}

/// Rebuild the new text from an ordered hunk sequence.
pub fn new_text<'a>(hunks: impl IntoIterator<Item = &'a Hunk>) -> String {
    hunks
        .into_iter()
        .filter(|hunk| hunk.on_new_side())
        .map(|hunk| hunk.text.as_str())
        .collect()
}
