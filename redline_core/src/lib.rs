//! Core library for reconciling two versions of a document.
//!
//! The crate is layered around three primary responsibilities:
//! - word-level diffing of two plain texts into hunks
//! - review state over those hunks and folding it into a final text
//! - reducing stored document bodies to plain text before diffing

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Public data models shared with hosts.
pub mod api;
/// Pairing stored versions for review.
pub mod comparison;
/// Diff and review tunables.
pub mod config;
/// Word-level diff engine.
pub mod diff;
/// Host bindings.
pub mod ffi;
/// Reduction of stored content to plain text.
pub mod normalize;
/// Review state over a computed diff.
pub mod review;
/// Text tokenization.
pub mod tokenize;

pub use api::{
    Choice, Delta, DeltaOp, Disposition, DocumentContent, Hunk, HunkKind, ReviewStats,
    ReviewedHunk, VersionRef,
};
pub use comparison::Comparison;
pub use config::{Config, DiffOptions, Granularity, PendingDeletions, ReviewOptions};
pub use diff::{compute_diff, DiffEngine};
pub use ffi::{
    diff_texts, normalize_json, open_comparison, open_comparison_with_config, CoreError,
    ReviewController,
};
pub use normalize::normalize;
pub use review::ReviewSession;

// Generated bindings resolve the interface types above through the crate root.
uniffi::include_scaffolding!("redline_core");

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An edit was requested without the text to put in place.
    #[error("hunk {id} cannot be marked edited without replacement text")]
    MissingReplacement {
        /// Hunk the edit targeted.
        id: u32,
    },
    /// Configuration could not be parsed.
    #[error("invalid configuration: {source}")]
    Config {
        /// File the configuration was read from, if any.
        path: Option<String>,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },
    /// Filesystem interaction failed.
    #[error("failed to access {path}: {source}")]
    Io {
        /// Filesystem path involved in the failed operation.
        path: String,
        /// Source I/O error returned by the standard library.
        #[source]
        source: std::io::Error,
    },
    /// Document content was not valid JSON.
    #[error("malformed document content: {source}")]
    Content {
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
}
