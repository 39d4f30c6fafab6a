//! Review state layered on top of a computed diff.
//!
//! A [`ReviewSession`] is a value: every operation returns a new session and
//! leaves the receiver untouched. Recomputing the diff means building a new
//! session with [`ReviewSession::initialize`]; decisions are never carried
//! over between diffs.

use crate::api::{Choice, Disposition, Hunk, HunkKind, ReviewStats, ReviewedHunk};
use crate::config::{PendingDeletions, ReviewOptions};
use crate::{Error, Result};

/// Reviewed hunks of one diff computation plus their tally.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewSession {
    hunks: Vec<ReviewedHunk>,
    stats: ReviewStats,
    options: ReviewOptions,
}

impl ReviewSession {
    /// Wrap freshly computed hunks, every one of them pending.
    #[must_use]
    pub fn initialize(hunks: Vec<Hunk>) -> Self {
        Self::with_options(hunks, ReviewOptions::default())
    }

    /// Wrap freshly computed hunks using explicit review options.
    #[must_use]
    pub fn with_options(hunks: Vec<Hunk>, options: ReviewOptions) -> Self {
        let hunks: Vec<ReviewedHunk> = hunks.into_iter().map(ReviewedHunk::from).collect();
        let stats = ReviewStats::tally(&hunks);
        Self {
            hunks,
            stats,
            options,
        }
    }

    /// All hunks in diff order, unchanged ones included.
    #[must_use]
    pub fn hunks(&self) -> &[ReviewedHunk] {
        &self.hunks
    }

    /// Hunks that take part in review decisions.
    pub fn changes(&self) -> impl Iterator<Item = &ReviewedHunk> + '_ {
        self.hunks.iter().filter(|hunk| hunk.is_change())
    }

    /// Look up a hunk by id.
    #[must_use]
    pub fn hunk(&self, id: u32) -> Option<&ReviewedHunk> {
        self.position(id).map(|index| &self.hunks[index])
    }

    /// Current tally of decisions.
    #[must_use]
    pub const fn stats(&self) -> ReviewStats {
        self.stats
    }

    /// Options this session materializes with.
    #[must_use]
    pub const fn options(&self) -> ReviewOptions {
        self.options
    }

    /// Whether any change carries a decision that recomputation would lose.
    #[must_use]
    pub fn has_decisions(&self) -> bool {
        self.stats.pending != self.stats.total()
    }

    /// First pending change after `after`, or from the start when `None`.
    #[must_use]
    pub fn next_pending(&self, after: Option<u32>) -> Option<&ReviewedHunk> {
        self.changes().find(|hunk| {
            hunk.disposition == Disposition::Pending && after.map_or(true, |after| hunk.id > after)
        })
    }

    /// Set the disposition of a single hunk.
    ///
    /// `replacement_text` is required for [`Disposition::Edited`] and ignored
    /// otherwise. Unknown ids and unchanged hunks leave the session as it is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingReplacement`] when `disposition` is `Edited`
    /// and no replacement text is supplied.
    pub fn set_disposition(
        &self,
        id: u32,
        disposition: Disposition,
        replacement_text: Option<String>,
    ) -> Result<Self> {
        let replacement_text = match (disposition, replacement_text) {
            (Disposition::Edited, Some(text)) => Some(text),
            (Disposition::Edited, None) => return Err(Error::MissingReplacement { id }),
            (_, _) => None,
        };

        let Some(index) = self.position(id) else {
            tracing::warn!(id, ?disposition, "ignoring decision for unknown hunk");
            return Ok(self.clone());
        };

        if !self.hunks[index].is_change() {
            tracing::debug!(id, ?disposition, "ignoring decision for unchanged hunk");
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let hunk = &mut next.hunks[index];
        hunk.disposition = disposition;
        hunk.replacement_text = replacement_text;
        Ok(next.retallied())
    }

    /// Shorthand for accepting a single hunk.
    #[must_use]
    pub fn accept(&self, id: u32) -> Self {
        self.decide(id, Disposition::Accepted)
    }

    /// Shorthand for rejecting a single hunk.
    #[must_use]
    pub fn reject(&self, id: u32) -> Self {
        self.decide(id, Disposition::Rejected)
    }

    /// Replace a hunk's text with reviewer-supplied text.
    #[must_use]
    pub fn edit(&self, id: u32, replacement_text: impl Into<String>) -> Self {
        self.set_disposition(id, Disposition::Edited, Some(replacement_text.into()))
            .unwrap_or_else(|_| self.clone())
    }

    /// Return a single hunk to pending.
    #[must_use]
    pub fn reset(&self, id: u32) -> Self {
        self.decide(id, Disposition::Pending)
    }

    /// Resolve a hunk by picking the side whose text should survive.
    #[must_use]
    pub fn choose(&self, id: u32, choice: Choice) -> Self {
        self.decide(id, choice.disposition())
    }

    /// Accept every change that was not edited.
    #[must_use]
    pub fn accept_all(&self) -> Self {
        self.bulk(Disposition::Accepted)
    }

    /// Reject every change that was not edited.
    #[must_use]
    pub fn reject_all(&self) -> Self {
        self.bulk(Disposition::Rejected)
    }

    /// Return every hunk to pending, discarding edits.
    #[must_use]
    pub fn reset_all(&self) -> Self {
        let mut next = self.clone();
        for hunk in &mut next.hunks {
            hunk.disposition = Disposition::Pending;
            hunk.replacement_text = None;
        }
        next.retallied()
    }

    /// Fold every decision into the resulting document text.
    #[must_use]
    pub fn materialize(&self) -> String {
        let mut output = String::new();
        for hunk in &self.hunks {
            if let Some(text) = self.materialized_span(hunk) {
                output.push_str(text);
            }
        }
        output
    }

    fn materialized_span<'a>(&self, hunk: &'a ReviewedHunk) -> Option<&'a str> {
        match (hunk.kind, hunk.disposition) {
            (HunkKind::Unchanged, _)
            | (HunkKind::Inserted, Disposition::Accepted)
            | (HunkKind::Deleted, Disposition::Rejected) => Some(&hunk.text),
            (HunkKind::Inserted | HunkKind::Deleted, Disposition::Edited) => {
                hunk.replacement_text.as_deref()
            }
            (HunkKind::Inserted, Disposition::Rejected | Disposition::Pending)
            | (HunkKind::Deleted, Disposition::Accepted) => None,
            (HunkKind::Deleted, Disposition::Pending) => match self.options.pending_deletions {
                PendingDeletions::Accept => None,
                PendingDeletions::Keep => Some(&hunk.text),
            },
        }
    }

    fn decide(&self, id: u32, disposition: Disposition) -> Self {
        debug_assert!(disposition != Disposition::Edited);
        self.set_disposition(id, disposition, None)
            .unwrap_or_else(|_| self.clone())
    }

    fn bulk(&self, disposition: Disposition) -> Self {
        let mut next = self.clone();
        for hunk in next
            .hunks
            .iter_mut()
            .filter(|hunk| hunk.is_change() && hunk.disposition != Disposition::Edited)
        {
            hunk.disposition = disposition;
        }
        next.retallied()
    }

    fn position(&self, id: u32) -> Option<usize> {
        let index = usize::try_from(id).ok()?;
        // Ids are dense sequence indexes, so the direct slot is checked first.
        match self.hunks.get(index) {
            Some(hunk) if hunk.id == id => Some(index),
            _ => self.hunks.iter().position(|hunk| hunk.id == id),
        }
    }

    fn retallied(mut self) -> Self {
        self.stats = ReviewStats::tally(&self.hunks);
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diff::compute_diff;

    fn deletion_session() -> ReviewSession {
        ReviewSession::initialize(compute_diff("a b c", "a c"))
    }

    fn insertion_session() -> ReviewSession {
        ReviewSession::initialize(compute_diff("hello world", "hello brave new world"))
    }

    fn dispositions(session: &ReviewSession) -> Vec<Disposition> {
        session.hunks().iter().map(|hunk| hunk.disposition).collect()
    }

    #[test]
    fn initialize_preserves_order_and_ids() {
        let session = insertion_session();
        let ids: Vec<u32> = session.hunks().iter().map(|hunk| hunk.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(session
            .hunks()
            .iter()
            .all(|hunk| hunk.disposition == Disposition::Pending));
        assert_eq!(
            session.stats(),
            ReviewStats {
                pending: 1,
                ..ReviewStats::ZERO
            }
        );
    }

    #[test]
    fn set_disposition_returns_new_session() -> Result<()> {
        let session = deletion_session();
        let next = session.set_disposition(1, Disposition::Rejected, None)?;

        assert_eq!(session.hunk(1).map(|h| h.disposition), Some(Disposition::Pending));
        assert_eq!(next.hunk(1).map(|h| h.disposition), Some(Disposition::Rejected));
        assert_eq!(next.stats().rejected, 1);
        assert_eq!(next.stats().pending, 0);
        Ok(())
    }

    #[test]
    fn edited_requires_replacement_text() {
        let session = deletion_session();
        let result = session.set_disposition(1, Disposition::Edited, None);
        assert!(matches!(result, Err(Error::MissingReplacement { id: 1 })));
    }

    #[test]
    fn replacement_text_is_dropped_for_other_dispositions() -> Result<()> {
        let session =
            deletion_session().set_disposition(1, Disposition::Accepted, Some("x".into()))?;
        assert_eq!(session.hunk(1).and_then(|h| h.replacement_text.clone()), None);
        Ok(())
    }

    #[test]
    fn leaving_edited_clears_replacement() {
        let session = deletion_session().edit(1, "beta ");
        assert_eq!(
            session.hunk(1).and_then(|h| h.replacement_text.as_deref()),
            Some("beta ")
        );

        let accepted = session.accept(1);
        let hunk = accepted.hunk(1).expect("hunk 1");
        assert_eq!(hunk.disposition, Disposition::Accepted);
        assert!(hunk.replacement_text.is_none());
    }

    #[test]
    fn unknown_id_is_a_no_op() -> Result<()> {
        let session = deletion_session();
        let next = session.set_disposition(42, Disposition::Accepted, None)?;
        assert_eq!(next, session);
        Ok(())
    }

    #[test]
    fn unchanged_hunks_ignore_decisions() -> Result<()> {
        let session = deletion_session();
        let next = session.set_disposition(0, Disposition::Edited, Some("z".into()))?;
        assert_eq!(next, session);
        Ok(())
    }

    #[test]
    fn bulk_operations_skip_edits() {
        let session =
            ReviewSession::initialize(compute_diff("one two three", "one 2 three 4"))
                .edit(1, "II ");

        let accepted = session.accept_all();
        assert_eq!(accepted.stats().edited, 1);
        assert_eq!(accepted.stats().pending, 0);
        assert_eq!(
            accepted.hunk(1).map(|h| h.disposition),
            Some(Disposition::Edited)
        );

        let rejected = accepted.reject_all();
        assert_eq!(rejected.stats().edited, 1);
        assert_eq!(rejected.stats().accepted, 0);
    }

    #[test]
    fn reset_all_clears_edits() {
        let session = deletion_session().edit(1, "beta ").reset_all();
        assert!(session
            .hunks()
            .iter()
            .all(|h| h.disposition == Disposition::Pending && h.replacement_text.is_none()));
    }

    #[test]
    fn state_machine_allows_every_transition() {
        let all = [
            Disposition::Pending,
            Disposition::Accepted,
            Disposition::Rejected,
            Disposition::Edited,
        ];
        for from in all {
            for to in all {
                let start = deletion_session()
                    .set_disposition(1, from, Some("from ".into()))
                    .expect("enter start state");
                let end = start
                    .set_disposition(1, to, Some("to ".into()))
                    .expect("transition");
                let hunk = end.hunk(1).expect("hunk 1");
                assert_eq!(hunk.disposition, to);
                assert_eq!(
                    hunk.replacement_text.is_some(),
                    to == Disposition::Edited,
                    "{from:?} -> {to:?}"
                );
            }
        }
    }

    #[test]
    fn stats_are_conserved() {
        let session = ReviewSession::initialize(compute_diff(
            "the cat sat on the mat",
            "a cat lay on a red mat today",
        ));
        let changes = u32::try_from(session.changes().count()).expect("change count");

        let mut steps = vec![session.clone()];
        for hunk in session.changes() {
            let last = steps.last().expect("at least one step").clone();
            steps.push(last.accept(hunk.id));
            steps.push(last.edit(hunk.id, "x "));
        }
        steps.push(steps.last().expect("last step").reject_all());
        steps.push(steps.last().expect("last step").reset_all());

        for step in &steps {
            assert_eq!(step.stats().total(), changes);
        }
    }

    #[test]
    fn materialize_deletion_scenarios() {
        let session = deletion_session();
        assert_eq!(session.reject(1).materialize(), "a b c");
        assert_eq!(session.accept(1).materialize(), "a c");
        assert_eq!(session.edit(1, "B ").materialize(), "a B c");
    }

    #[test]
    fn materialize_insertion_scenarios() {
        let session = insertion_session();
        assert_eq!(session.accept_all().materialize(), "hello brave new world");
        assert_eq!(session.reject_all().materialize(), "hello world");
        assert_eq!(session.edit(1, "cruel ").materialize(), "hello cruel world");
    }

    #[test]
    fn pending_policy_controls_deletions() {
        let hunks = compute_diff("keep drop this end", "keep this new end");

        let accept = ReviewSession::initialize(hunks.clone());
        assert_eq!(accept.materialize(), "keep this end");

        let keep = ReviewSession::with_options(
            hunks,
            ReviewOptions {
                pending_deletions: PendingDeletions::Keep,
            },
        );
        assert_eq!(keep.materialize(), "keep drop this end");
    }

    #[test]
    fn choose_reproduces_the_chosen_side() {
        let old = "alpha beta gamma";
        let new = "alpha delta gamma epsilon";
        let session = ReviewSession::initialize(compute_diff(old, new));
        let ids: Vec<u32> = session.changes().map(|hunk| hunk.id).collect();

        let take_old = ids.iter().fold(session.clone(), |s, id| s.choose(*id, Choice::Old));
        assert_eq!(take_old.materialize(), old);

        let take_new = ids.iter().fold(session, |s, id| s.choose(*id, Choice::New));
        assert_eq!(take_new.materialize(), new);
    }

    #[test]
    fn choosing_old_on_a_deletion_keeps_the_text() {
        let session = deletion_session().choose(1, Choice::Old);
        assert_eq!(session.hunk(1).map(|h| h.disposition), Some(Disposition::Rejected));
        assert_eq!(session.stats().rejected, 1);
        assert_eq!(session.materialize(), "a b c");
    }

    #[test]
    fn navigation_and_decision_tracking() {
        let session = ReviewSession::initialize(compute_diff("a b c d", "a x c y"));
        assert!(!session.has_decisions());

        let first = session.next_pending(None).expect("first pending").id;
        let second = session.next_pending(Some(first)).expect("second pending").id;
        assert!(second > first);

        let decided = session.accept(first);
        assert!(decided.has_decisions());
        assert_eq!(decided.next_pending(None).map(|h| h.id), Some(second));
        assert_eq!(dispositions(&decided.reset_all()), dispositions(&session));
    }
}
