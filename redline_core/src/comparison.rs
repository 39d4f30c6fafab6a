//! Pairing two stored versions for review.

use std::cmp::Ordering;

use crate::api::VersionRef;
use crate::config::Config;
use crate::diff::DiffEngine;
use crate::normalize::normalize;
use crate::review::ReviewSession;

/// Two versions ordered oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    old: VersionRef,
    new: VersionRef,
}

impl Comparison {
    /// Order `first` and `second` so the older one is the old side.
    ///
    /// The live document is newer than any numbered version; versions without
    /// a number sort before numbered ones.
    #[must_use]
    pub fn new(first: VersionRef, second: VersionRef) -> Self {
        if age_order(&first, &second) == Ordering::Greater {
            Self {
                old: second,
                new: first,
            }
        } else {
            Self {
                old: first,
                new: second,
            }
        }
    }

    /// Older version.
    #[must_use]
    pub const fn older(&self) -> &VersionRef {
        &self.old
    }

    /// Newer version.
    #[must_use]
    pub const fn newer(&self) -> &VersionRef {
        &self.new
    }

    /// Plain text of both sides, old first.
    #[must_use]
    pub fn texts(&self) -> (String, String) {
        (normalize(&self.old.content), normalize(&self.new.content))
    }

    /// Diff both sides and start a fresh review.
    #[must_use]
    pub fn session(&self, config: &Config) -> ReviewSession {
        let (old_text, new_text) = self.texts();
        let hunks = DiffEngine::with_options(config.diff).diff(&old_text, &new_text);
        ReviewSession::with_options(hunks, config.review)
    }
}

fn age_order(left: &VersionRef, right: &VersionRef) -> Ordering {
    left.is_latest.cmp(&right.is_latest).then_with(|| {
        left.version_number
            .unwrap_or(0)
            .cmp(&right.version_number.unwrap_or(0))
    })
}
