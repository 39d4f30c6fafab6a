use std::sync::{Arc, Mutex};

use crate::{
    config::Config, diff::DiffEngine, normalize::normalize, review::ReviewSession, Choice,
    Disposition, DocumentContent, Hunk, ReviewStats, ReviewedHunk,
};

use super::CoreError;

type Result<T> = std::result::Result<T, CoreError>;

/// Review handle exposed to hosts via `UniFFI`.
///
/// Holds the current [`ReviewSession`]; every mutation swaps in the session
/// returned by the corresponding value operation.
#[derive(Debug)]
pub struct ReviewController {
    config: Config,
    session: Mutex<ReviewSession>,
}

impl ReviewController {
    fn new(config: Config, old_text: &str, new_text: &str) -> Self {
        Self {
            config,
            session: Mutex::new(build_session(config, old_text, new_text)),
        }
    }

    /// Diff a new pair of texts, replacing the current review wholesale.
    ///
    /// Returns `true` when decisions made on the previous diff were discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn compare(&self, old_text: String, new_text: String) -> Result<bool> {
        let next = build_session(self.config, &old_text, &new_text);
        let mut session = self.session.lock().map_err(CoreError::from)?;
        let discarded = session.has_decisions();
        if discarded {
            let stats = session.stats();
            tracing::warn!(
                accepted = stats.accepted,
                rejected = stats.rejected,
                edited = stats.edited,
                "recomputed diff discarded review decisions"
            );
        }
        *session = next;
        Ok(discarded)
    }

    /// Snapshot of every hunk in diff order.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn hunks(&self) -> Result<Vec<ReviewedHunk>> {
        self.with_session(|session| session.hunks().to_vec())
    }

    /// Current decision tally.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn stats(&self) -> Result<ReviewStats> {
        self.with_session(ReviewSession::stats)
    }

    /// Whether recomputing would discard decisions.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn has_decisions(&self) -> Result<bool> {
        self.with_session(ReviewSession::has_decisions)
    }

    /// Set one hunk's disposition.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingReplacement`] for an edit without text, or
    /// an error when the session lock is poisoned.
    pub fn set_disposition(
        &self,
        id: u32,
        disposition: Disposition,
        replacement_text: Option<String>,
    ) -> Result<()> {
        self.update(|session| session.set_disposition(id, disposition, replacement_text))
    }

    /// Resolve one hunk by picking a side.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn choose(&self, id: u32, choice: Choice) -> Result<()> {
        self.update(|session| Ok(session.choose(id, choice)))
    }

    /// Accept every change that was not edited.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn accept_all(&self) -> Result<()> {
        self.update(|session| Ok(session.accept_all()))
    }

    /// Reject every change that was not edited.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn reject_all(&self) -> Result<()> {
        self.update(|session| Ok(session.reject_all()))
    }

    /// Return every hunk to pending.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn reset_all(&self) -> Result<()> {
        self.update(|session| Ok(session.reset_all()))
    }

    /// Final document text under the current decisions.
    ///
    /// # Errors
    ///
    /// Returns an error when the session lock is poisoned.
    pub fn materialize(&self) -> Result<String> {
        self.with_session(ReviewSession::materialize)
    }

    fn with_session<F, T>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&ReviewSession) -> T,
    {
        let session = self.session.lock().map_err(CoreError::from)?;
        Ok(op(&session))
    }

    fn update<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&ReviewSession) -> crate::Result<ReviewSession>,
    {
        let mut session = self.session.lock().map_err(CoreError::from)?;
        *session = op(&session).map_err(CoreError::from)?;
        Ok(())
    }
}

fn build_session(config: Config, old_text: &str, new_text: &str) -> ReviewSession {
    let hunks = DiffEngine::with_options(config.diff).diff(old_text, new_text);
    ReviewSession::with_options(hunks, config.review)
}

/// Start reviewing two texts with default configuration.
#[must_use]
pub fn open_comparison(old_text: String, new_text: String) -> Arc<ReviewController> {
    Arc::new(ReviewController::new(
        Config::default(),
        &old_text,
        &new_text,
    ))
}

/// Start reviewing two texts with configuration given as TOML.
///
/// # Errors
///
/// Returns [`CoreError::Config`] when the configuration cannot be parsed.
pub fn open_comparison_with_config(
    old_text: String,
    new_text: String,
    config_toml: String,
) -> Result<Arc<ReviewController>> {
    let config = Config::from_toml_str(&config_toml).map_err(CoreError::from)?;
    Ok(Arc::new(ReviewController::new(config, &old_text, &new_text)))
}

/// Diff two texts with default options.
#[must_use]
pub fn diff_texts(old_text: String, new_text: String) -> Vec<Hunk> {
    crate::diff::compute_diff(&old_text, &new_text)
}

/// Reduce a JSON-encoded document body to plain text.
///
/// # Errors
///
/// Returns [`CoreError::Content`] when `content_json` is not valid JSON.
pub fn normalize_json(content_json: String) -> Result<String> {
    let content = DocumentContent::parse_json(&content_json).map_err(CoreError::from)?;
    Ok(normalize(&content))
}
