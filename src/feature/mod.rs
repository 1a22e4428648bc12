//! The gene feature hierarchy and its trimming pipeline.

pub mod gene;
pub mod part;
pub mod transcript;

pub use gene::Gene;
pub use part::{Cds, CdsSegment, Exon};
pub use transcript::Transcript;

use crate::types::{Span, Strand};

/// Capability contract every sub-feature in the hierarchy supports.
///
/// A parent drives the trim pipeline through these calls without knowing
/// the concrete shape of its children: each level corrects itself, then
/// forwards the same call one level down.
pub trait Feature {
    /// The coordinate extent of this feature (the segment hull for
    /// multi-segment parts). `(0, 0)` once the feature has been removed.
    fn span(&self) -> Span;

    /// Total number of coordinates covered by this feature.
    fn length(&self) -> i64;

    /// Clamp against `boundary` in the current coordinate space. A feature
    /// starting past the boundary collapses to the empty sentinel; one
    /// ending past it is cut back to the boundary and forwards the clamp
    /// to its own sub-features.
    fn trim_end(&mut self, boundary: i64);

    /// Shift every coordinate in this subtree by `delta`. No validity
    /// checks; cleanup happens in a separate pass.
    fn adjust_indices(&mut self, delta: i64);

    /// Normalize indices after a shift: collapse subtrees pushed entirely
    /// before coordinate 1, clamp partial left overhangs to 1, recurse.
    fn clean_up_indices(&mut self);

    /// Drop sub-features invalidated by cleanup (span start exactly 0) and
    /// let survivors filter their own children.
    fn remove_invalid_features(&mut self);

    /// Recompute reading-frame phase after a coordinate shift. Default is
    /// a no-op; CDS-bearing features override.
    fn adjust_phase(&mut self) {}

    /// Render this feature (and its sub-features) as tab-separated text
    /// records, inheriting `seq_name`, `source`, and `strand` from the
    /// root unless overridden.
    fn to_text_record(&self, seq_name: &str, source: &str, strand: Strand) -> String;
}
