use serde::{Deserialize, Serialize};

use super::diff::{Hunk, HunkKind};

/// Reviewer decision attached to a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// No decision yet.
    #[default]
    Pending,
    /// The change is taken into the result.
    Accepted,
    /// The change is discarded.
    Rejected,
    /// The reviewer supplied their own text for the span.
    Edited,
}

/// Two-sided resolution offered by side-by-side views.
///
/// Converted into a [`Disposition`] so that choosing a side reproduces that
/// side's text for the hunk when materializing. The mapping depends on the
/// side, not on the hunk kind: `Old` on a deletion keeps the deleted text and
/// so counts as [`Disposition::Rejected`], not as accepting the deletion.
/// Hosts that treat "left" as "accept" must map a left click on a deletion
/// to [`Disposition::Accepted`] themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// Keep what the old version had.
    Old,
    /// Keep what the new version has.
    New,
}

impl Choice {
    /// Disposition equivalent to this choice.
    #[must_use]
    pub const fn disposition(self) -> Disposition {
        match self {
            Self::Old => Disposition::Rejected,
            Self::New => Disposition::Accepted,
        }
    }
}

/// A hunk enriched with review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewedHunk {
    /// Handle used by mutation calls; equals the originating sequence index.
    pub id: u32,
    /// Classification inherited from the diff.
    pub kind: HunkKind,
    /// Literal span inherited from the diff.
    pub text: String,
    /// Current decision.
    #[serde(default)]
    pub disposition: Disposition,
    /// Reviewer text, only present while `disposition` is `Edited`.
    #[serde(default)]
    pub replacement_text: Option<String>,
}

impl ReviewedHunk {
    /// Whether the hunk takes part in review decisions.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        self.kind.is_change()
    }
}

impl From<Hunk> for ReviewedHunk {
    fn from(hunk: Hunk) -> Self {
        Self {
            id: hunk.sequence_index,
            kind: hunk.kind,
            text: hunk.text,
            disposition: Disposition::Pending,
            replacement_text: None,
        }
    }
}

/// Tally of decisions over the changed hunks of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    /// Hunks marked accepted.
    pub accepted: u32,
    /// Hunks marked rejected.
    pub rejected: u32,
    /// Hunks without a decision.
    pub pending: u32,
    /// Hunks carrying reviewer text.
    pub edited: u32,
}

impl ReviewStats {
    /// A stats instance with every bucket empty.
    pub const ZERO: Self = Self {
        accepted: 0,
        rejected: 0,
        pending: 0,
        edited: 0,
    };

    /// Count the changed hunks of `hunks` by disposition.
    pub fn tally<'a>(hunks: impl IntoIterator<Item = &'a ReviewedHunk>) -> Self {
        hunks
            .into_iter()
            .filter(|hunk| hunk.is_change())
            .fold(Self::ZERO, |stats, hunk| stats.record(hunk.disposition))
    }

    /// Total number of changed hunks counted.
    #[must_use]
    pub const fn total(self) -> u32 {
        self.accepted + self.rejected + self.pending + self.edited
    }

    /// Whether every counted hunk has left the pending state.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.pending == 0
    }

    const fn record(mut self, disposition: Disposition) -> Self {
        match disposition {
            Disposition::Pending => self.pending += 1,
            Disposition::Accepted => self.accepted += 1,
            Disposition::Rejected => self.rejected += 1,
            Disposition::Edited => self.edited += 1,
        }
        self
    }
}
