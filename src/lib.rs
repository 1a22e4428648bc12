//! annotrim - Gene annotation modeling and coordinate-space trimming.
//!
//! This library models gene annotation records as a three-level ownership
//! hierarchy (gene -> transcript -> coding/exon parts) and adjusts every
//! coordinate in that hierarchy when the underlying sequence is clipped,
//! reindexed, or partially removed.
//!
//! # Features
//!
//! - Trim a gene and its whole subtree to a retained coordinate window
//! - Pure coordinate shifts for origin changes
//! - Reading-frame phase re-derivation for clipped CDS segments
//! - Removal of features that fall outside the retained window
//! - GFF-style text records and feature-table entries for the result
//!
//! # Example
//!
//! ```ignore
//! use annotrim::{Gene, Span, Strand};
//!
//! let mut gene = Gene::new("chr1", "annotrim", Span::new(10, 50), Strand::Positive, "g1", "geneA");
//!
//! // Keep only coordinates 20..=40 of the original sequence.
//! gene.trim(Span::new(20, 40))?;
//! assert_eq!(gene.span, Span::new(1, 21));
//!
//! print!("{}", gene.to_gff());
//! ```

pub mod error;
pub mod feature;
pub mod output;
pub mod types;

pub use error::AnnotrimError;
pub use feature::{Cds, CdsSegment, Exon, Feature, Gene, Transcript};
pub use output::FeatureTblEntry;
pub use types::{Span, Strand};
