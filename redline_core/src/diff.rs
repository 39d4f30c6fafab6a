//! Word-level diff between two document texts.
//!
//! Texts are split into tokens (see [`crate::tokenize`]) and the token
//! contents are aligned with the Myers algorithm from `similar`. Whitespace
//! between aligned tokens is compared on its own, so a word keeps matching
//! when only its surrounding spacing changed. The result is folded into
//! maximal hunks: adjacent spans of the same kind share a hunk, and inside
//! each changed region the deletion precedes the insertion.

use std::mem;

use similar::{capture_diff_slices, Algorithm, DiffOp};

use crate::api::{Hunk, HunkKind};
use crate::config::DiffOptions;
use crate::tokenize::{tokenize, whitespace_insensitive_key, Token};

/// Entry point for diff generation.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    /// Construct a diff engine with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a diff engine with explicit options.
    #[must_use]
    pub const fn with_options(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Options in effect for this engine.
    #[must_use]
    pub const fn options(&self) -> DiffOptions {
        self.options
    }

    /// Compute the ordered hunks turning `old_text` into `new_text`.
    ///
    /// Unless whitespace is ignored, concatenating unchanged and deleted hunks
    /// reproduces `old_text`, and unchanged and inserted hunks reproduce
    /// `new_text`. With whitespace ignored, unchanged hunks carry the new
    /// side's text and whitespace-only deletions are dropped, so only the new
    /// side round-trips exactly.
    #[must_use]
    pub fn diff(&self, old_text: &str, new_text: &str) -> Vec<Hunk> {
        let old = tokenize(old_text, self.options.granularity);
        let new = tokenize(new_text, self.options.granularity);
        let ignore_whitespace = self.options.ignore_whitespace;

        let old_keys = comparison_keys(&old.tokens, ignore_whitespace);
        let new_keys = comparison_keys(&new.tokens, ignore_whitespace);
        let ops = capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys);

        let mut builder = HunkBuilder::new(ignore_whitespace);
        builder.gap(old.leading, new.leading);
        for op in ops {
            match op {
                DiffOp::Equal {
                    old_index,
                    new_index,
                    len,
                } => {
                    let pairs = old.tokens[old_index..old_index + len]
                        .iter()
                        .zip(&new.tokens[new_index..new_index + len]);
                    for (old_token, new_token) in pairs {
                        // Contents only differ when whitespace is ignored.
                        let content = if ignore_whitespace {
                            new_token.content
                        } else {
                            old_token.content
                        };
                        builder.unchanged(content);
                        builder.gap(old_token.trailing, new_token.trailing);
                    }
                }
                DiffOp::Delete {
                    old_index, old_len, ..
                } => builder.deleted(&old.tokens[old_index..old_index + old_len]),
                DiffOp::Insert {
                    new_index, new_len, ..
                } => builder.inserted(&new.tokens[new_index..new_index + new_len]),
                DiffOp::Replace {
                    old_index,
                    old_len,
                    new_index,
                    new_len,
                } => {
                    builder.deleted(&old.tokens[old_index..old_index + old_len]);
                    builder.inserted(&new.tokens[new_index..new_index + new_len]);
                }
            }
        }

        let hunks = builder.finish();
        tracing::debug!(
            old_tokens = old.tokens.len(),
            new_tokens = new.tokens.len(),
            hunks = hunks.len(),
            granularity = ?self.options.granularity,
            "computed diff"
        );
        hunks
    }
}

/// Diff two texts with default options.
#[must_use]
pub fn compute_diff(old_text: &str, new_text: &str) -> Vec<Hunk> {
    DiffEngine::new().diff(old_text, new_text)
}

fn comparison_keys<'a>(tokens: &[Token<'a>], ignore_whitespace: bool) -> Vec<&'a str> {
    tokens
        .iter()
        .map(|token| {
            if ignore_whitespace {
                whitespace_insensitive_key(token.content)
            } else {
                token.content
            }
        })
        .collect()
}

fn is_blank(text: &str) -> bool {
    text.chars().all(char::is_whitespace)
}

/// Accumulates diff operations into maximal hunks.
#[derive(Debug)]
struct HunkBuilder {
    ignore_whitespace: bool,
    spans: Vec<(HunkKind, String)>,
    deleted: String,
    inserted: String,
}

impl HunkBuilder {
    const fn new(ignore_whitespace: bool) -> Self {
        Self {
            ignore_whitespace,
            spans: Vec::new(),
            deleted: String::new(),
            inserted: String::new(),
        }
    }

    fn unchanged(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush_changes();
        self.push(HunkKind::Unchanged, text);
    }

    /// Whitespace separating aligned tokens, or the whitespace before the
    /// first token.
    fn gap(&mut self, old: &str, new: &str) {
        if old == new {
            self.unchanged(old);
        } else if self.ignore_whitespace {
            self.unchanged(new);
        } else {
            self.deleted.push_str(old);
            self.inserted.push_str(new);
        }
    }

    fn deleted(&mut self, tokens: &[Token<'_>]) {
        for token in tokens {
            self.deleted.push_str(token.content);
            self.deleted.push_str(token.trailing);
        }
    }

    fn inserted(&mut self, tokens: &[Token<'_>]) {
        for token in tokens {
            self.inserted.push_str(token.content);
            self.inserted.push_str(token.trailing);
        }
    }

    fn flush_changes(&mut self) {
        let deleted = mem::take(&mut self.deleted);
        let inserted = mem::take(&mut self.inserted);

        if !(self.ignore_whitespace && is_blank(&deleted)) {
            self.push(HunkKind::Deleted, &deleted);
        }

        let inserted_kind = if self.ignore_whitespace && is_blank(&inserted) {
            HunkKind::Unchanged
        } else {
            HunkKind::Inserted
        };
        self.push(inserted_kind, &inserted);
    }

    fn push(&mut self, kind: HunkKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some((last_kind, last_text)) if *last_kind == kind => last_text.push_str(text),
            _ => self.spans.push((kind, text.to_owned())),
        }
    }

    fn finish(mut self) -> Vec<Hunk> {
        self.flush_changes();
        self.spans
            .into_iter()
            .enumerate()
            .map(|(index, (kind, text))| {
                Hunk::new(u32::try_from(index).unwrap_or(u32::MAX), kind, text)
            })
            .collect()
    }
}
