//! Plain data models shared with presentation hosts.
//!
//! The structures in this module are designed to be:
//! - serializable via `serde` for persistence and transport
//! - restricted to FFI-friendly primitives so the bindings can carry them as-is

/// Version bodies and their loosely-typed formats.
pub mod content;
/// Hunks produced by the diff engine.
pub mod diff;
/// Review decisions and their tallies.
pub mod review;

pub use content::{Delta, DeltaOp, DocumentContent, VersionRef};
pub use diff::{Hunk, HunkKind};
pub use review::{Choice, Disposition, ReviewStats, ReviewedHunk};
