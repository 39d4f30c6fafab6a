//! Tunables for diffing and materialization, loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How texts are split and compared.
    pub diff: DiffOptions,
    /// How review decisions fold into the final document.
    pub review: ReviewOptions,
}

impl Config {
    /// Parse configuration from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the document is not valid TOML or holds
    /// unknown values.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|source| Error::Config { path: None, source })
    }

    /// Read configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read and [`Error::Config`]
    /// when its contents fail to parse.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|source| Error::Io {
            path: display.clone(),
            source,
        })?;
        toml::from_str(&source).map_err(|source| Error::Config {
            path: Some(display),
            source,
        })
    }
}

/// Options consumed by [`crate::diff::DiffEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Unit of comparison.
    pub granularity: Granularity,
    /// Treat tokens that differ only in whitespace as equal.
    pub ignore_whitespace: bool,
}

/// Unit of comparison used when splitting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// A run of non-whitespace, with whitespace runs as separate tokens.
    #[default]
    Word,
    /// A single character.
    Character,
    /// A line including its terminator.
    Line,
}

/// Options consumed by [`crate::review::ReviewSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewOptions {
    /// What a deletion without a decision does to the final document.
    pub pending_deletions: PendingDeletions,
}

/// Materialization policy for pending deletions.
///
/// Pending insertions are always left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingDeletions {
    /// The deletion is applied until rejected.
    #[default]
    Accept,
    /// The deleted text stays until the deletion is accepted.
    Keep,
}
