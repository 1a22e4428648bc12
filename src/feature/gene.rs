//! The gene level of the feature hierarchy and the trim pipeline.

use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::AnnotrimError;
use crate::feature::transcript::Transcript;
use crate::feature::Feature;
use crate::output::FeatureTblEntry;
use crate::types::{Span, Strand};

/// True when `window` retains nothing of `span`: the discard-everything
/// sentinel, or a span lying entirely outside the window.
fn trimmed_completely(span: Span, window: Span) -> bool {
    window.is_empty() || span.start > window.end || span.end < window.start
}

/// A gene annotation record, root of the feature hierarchy.
///
/// Owns its transcripts exclusively; insertion order is preserved and is
/// observable in the text output. All coordinate mutation goes through the
/// trim/adjust operations. A gene whose span becomes the `(0, 0)` sentinel
/// is logically destroyed and has no transcripts; removing it from any
/// larger collection is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gene {
    pub seq_name: String,
    pub source: String,
    pub span: Span,
    pub strand: Strand,
    pub identifier: String,
    pub name: String,
    /// Optional score; absence renders as `.` in output.
    pub score: Option<f64>,
    pub transcripts: Vec<Transcript>,
}

impl Gene {
    /// Create a new gene with no transcripts and no score.
    pub fn new(
        seq_name: &str,
        source: &str,
        span: Span,
        strand: Strand,
        identifier: &str,
        name: &str,
    ) -> Self {
        Gene {
            seq_name: seq_name.to_string(),
            source: source.to_string(),
            span,
            strand,
            identifier: identifier.to_string(),
            name: name.to_string(),
            score: None,
            transcripts: Vec::new(),
        }
    }

    /// Attach a transcript. Insertion order is preserved in output.
    pub fn add_transcript(&mut self, transcript: Transcript) {
        self.transcripts.push(transcript);
    }

    /// True iff this gene has been fully removed.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Number of coordinates covered by the gene span. Reporting only;
    /// check [`Gene::is_empty`] before trusting it.
    pub fn length(&self) -> i64 {
        self.span.length()
    }

    /// The score column value: the score, or `.` when absent.
    pub fn score_or_dot(&self) -> String {
        match self.score {
            Some(score) => score.to_string(),
            None => ".".to_string(),
        }
    }

    /// Collision query against an external inclusive interval, independent
    /// of trimming.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        self.span.overlaps(start, end)
    }

    /// Linear scan for a transcript with exactly this name.
    pub fn contains_transcript_named(&self, name: &str) -> bool {
        self.transcripts.iter().any(|t| t.name == name)
    }

    /// Minimum, over all transcripts, of each transcript's shortest coding
    /// segment length.
    ///
    /// Fails with [`AnnotrimError::EmptyHierarchy`] when the gene has no
    /// transcripts, or when no transcript carries a coding region: in
    /// either case there is no segment to measure.
    pub fn length_of_shortest_cds_segment(&self) -> Result<i64, AnnotrimError> {
        self.transcripts
            .iter()
            .filter_map(Transcript::shortest_cds_segment_length)
            .min()
            .ok_or_else(|| AnnotrimError::EmptyHierarchy(self.name.clone()))
    }

    /// Remove every transcript whose total coding length is strictly below
    /// `min_length`.
    // TODO: this also drops transcripts with no CDS at all; decide whether
    // those should survive a length-based prune.
    pub fn remove_transcripts_with_cds_shorter_than(&mut self, min_length: i64) {
        debug!("pruning short-CDS transcripts on gene {}", self.name);
        self.transcripts.retain(|t| match t.cds_length() {
            Some(length) => {
                trace!("transcript {} has CDS of length {}", t.name, length);
                length >= min_length
            }
            None => {
                trace!("transcript {} has no CDS, dropping", t.name);
                false
            }
        });
    }

    /// Clamp the subtree against `boundary` in the current coordinate
    /// space. A gene starting past the boundary collapses to the empty
    /// sentinel; one ending past it is cut back and the clamp is forwarded
    /// to every transcript.
    pub fn trim_end(&mut self, boundary: i64) {
        if self.span.start > boundary {
            self.span = Span::EMPTY;
        } else if self.span.end > boundary {
            self.span.end = boundary;
            for transcript in &mut self.transcripts {
                transcript.trim_end(boundary);
            }
        }
    }

    /// Re-express the subtree relative to a new origin: `begin` is the new
    /// start index of the sequence. Pure shift, no clamping; cleanup runs
    /// in a separate pass.
    pub fn trim_begin(&mut self, begin: i64) {
        self.adjust_indices(-begin + 1);
    }

    /// Shift every coordinate in the subtree by `delta`. No validity
    /// checks; exposed for callers that have already validated the target
    /// window.
    pub fn adjust_indices(&mut self, delta: i64) {
        self.span.shift(delta);
        for transcript in &mut self.transcripts {
            transcript.adjust_indices(delta);
        }
    }

    /// Normalize indices after a shift, each level correcting itself and
    /// then recursing.
    pub fn clean_up_indices(&mut self) {
        self.span.clean_up();
        for transcript in &mut self.transcripts {
            transcript.clean_up_indices();
        }
    }

    /// Drop transcripts invalidated by cleanup (span start exactly 0) and
    /// let the survivors filter their own parts.
    pub fn remove_invalid_features(&mut self) {
        self.transcripts.retain(|t| t.span.start != 0);
        for transcript in &mut self.transcripts {
            transcript.remove_invalid_features();
        }
    }

    /// Trim the gene and its whole subtree to `window`, the inclusive
    /// interval of original-space coordinates to keep.
    ///
    /// The `(0, 0)` window discards everything. A window with
    /// `start > end` is rejected with [`AnnotrimError::InvalidWindow`]
    /// before any mutation. Otherwise the pipeline runs in fixed order:
    /// end-trim in original coordinates, begin-trim reindex, phase
    /// re-derivation, index cleanup, invalid-feature removal.
    pub fn trim(&mut self, window: Span) -> Result<(), AnnotrimError> {
        if window.start > window.end && !window.is_empty() {
            return Err(AnnotrimError::InvalidWindow(window.start, window.end));
        }
        trace!("trimming gene {} ({}) to window {}", self.name, self.span, window);

        if trimmed_completely(self.span, window) {
            self.transcripts.clear();
            self.span = Span::EMPTY;
            return Ok(());
        }

        self.trim_end(window.end);
        self.trim_begin(window.start);
        for transcript in &mut self.transcripts {
            transcript.adjust_phase();
        }
        self.clean_up_indices();
        self.remove_invalid_features();
        Ok(())
    }

    /// Render the gene and its subtree as GFF-style text: one tab-separated
    /// line for the gene, then each transcript's records, all inheriting
    /// the gene's sequence name, source, and strand.
    pub fn to_gff(&self) -> String {
        let mut result = format!(
            "{}\t{}\tgene\t{}\t{}\t{}\t{}\t.\tID={};Name={}\n",
            self.seq_name,
            self.source,
            self.span.start,
            self.span.end,
            self.score_or_dot(),
            self.strand,
            self.identifier,
            self.name
        );
        for transcript in &self.transcripts {
            result.push_str(&transcript.to_text_record(&self.seq_name, &self.source, self.strand));
        }
        result
    }

    /// Build feature-table entries for the gene and its transcripts, each
    /// entry stamped with the gene's sequence name.
    pub fn to_tbl_entries(&self) -> Vec<FeatureTblEntry> {
        let mut entries = Vec::new();

        let mut gene_entry = FeatureTblEntry::new();
        gene_entry.set_type("gene");
        gene_entry.set_name(&self.name);
        gene_entry.set_seq_name(&self.seq_name);
        gene_entry.add_coordinates(self.span.start, self.span.end);
        gene_entry.set_strand(self.strand);
        gene_entry.set_phase(0);
        // Pretend there's a start and stop codon for genes.
        gene_entry.set_partial_info(true, true);
        entries.push(gene_entry);

        for transcript in &self.transcripts {
            for mut entry in transcript.to_tbl_entries(self.strand) {
                entry.set_seq_name(&self.seq_name);
                entries.push(entry);
            }
        }
        entries
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gene (ID={}, Name={}, seq_name={}) containing {} transcripts",
            self.identifier,
            self.name,
            self.seq_name,
            self.transcripts.len()
        )
    }
}
