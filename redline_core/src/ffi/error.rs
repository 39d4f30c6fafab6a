use std::sync::PoisonError;

use thiserror::Error;

use crate::Error;

/// Errors surfaced through the `UniFFI` bindings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An edit was requested without replacement text.
    #[error("edited hunks need replacement text")]
    MissingReplacement,
    /// Configuration could not be parsed.
    #[error("invalid configuration")]
    Config,
    /// Filesystem interaction failed.
    #[error("filesystem error")]
    Io,
    /// Document content was not valid JSON.
    #[error("malformed document content")]
    Content,
    /// Internal invariant failed.
    #[error("internal error")]
    Internal,
}

impl From<Error> for CoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::MissingReplacement { .. } => Self::MissingReplacement,
            Error::Config { .. } => Self::Config,
            Error::Io { .. } => Self::Io,
            Error::Content { .. } => Self::Content,
        }
    }
}

impl<T> From<PoisonError<T>> for CoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Internal
    }
}
