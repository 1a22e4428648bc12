//! The [`AnnotrimError`] `enum` definition and error messages.

use thiserror::Error;

/// The standard set of errors surfaced to callers of this library.
///
/// Trim and shift operations are deterministic tree mutations; every error
/// here is a precondition violation, not a transient condition, so no retry
/// policy applies.
#[derive(Debug, Error)]
pub enum AnnotrimError {
    /// A query that requires at least one coding feature was made against a
    /// gene with none (no transcripts, or no transcript carries a CDS).
    #[error("gene '{0}' has no coding features to measure")]
    EmptyHierarchy(String),

    /// A retained window with start > end that is not the `(0, 0)`
    /// discard-everything sentinel.
    #[error("invalid retained window: start ({0}) is greater than end ({1})")]
    InvalidWindow(i64, i64),

    #[error("write error: {0}")]
    Io(#[from] std::io::Error),
}
