//! The transcript (mRNA) level of the feature hierarchy.

use serde::{Deserialize, Serialize};

use crate::feature::part::{Cds, Exon};
use crate::feature::Feature;
use crate::output::FeatureTblEntry;
use crate::types::{Span, Strand};

/// A transcript owning an optional coding region and an optional exon
/// group.
///
/// Every mutating call corrects the transcript's own span, then forwards
/// the same call to its parts; the parent gene drives the overall pipeline
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub identifier: String,
    pub name: String,
    pub span: Span,
    pub cds: Option<Cds>,
    pub exon: Option<Exon>,
}

impl Transcript {
    /// Create a new transcript with no parts attached.
    pub fn new(identifier: &str, name: &str, span: Span) -> Self {
        Transcript {
            identifier: identifier.to_string(),
            name: name.to_string(),
            span,
            cds: None,
            exon: None,
        }
    }

    /// Attach the coding region.
    pub fn set_cds(&mut self, cds: Cds) {
        self.cds = Some(cds);
    }

    /// Attach the exon group.
    pub fn set_exon(&mut self, exon: Exon) {
        self.exon = Some(exon);
    }

    /// True iff this transcript has been fully removed.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Total coding length, or `None` when no coding region is attached.
    pub fn cds_length(&self) -> Option<i64> {
        self.cds.as_ref().map(Cds::length)
    }

    /// Length of the shortest coding segment, or `None` when there is no
    /// coding region (or it has no segments left).
    pub fn shortest_cds_segment_length(&self) -> Option<i64> {
        self.cds.as_ref().and_then(Cds::shortest_segment_length)
    }

    /// Build the feature-table entries for this transcript: an mRNA entry
    /// followed by a CDS entry when a coding region is present. The caller
    /// stamps the sequence name onto each entry.
    pub fn to_tbl_entries(&self, strand: Strand) -> Vec<FeatureTblEntry> {
        let mut entries = Vec::new();

        let mut mrna_entry = FeatureTblEntry::new();
        mrna_entry.set_type("mRNA");
        mrna_entry.set_name(&self.name);
        match &self.exon {
            Some(exon) => {
                for span in &exon.segments {
                    mrna_entry.add_coordinates(span.start, span.end);
                }
            }
            None => mrna_entry.add_coordinates(self.span.start, self.span.end),
        }
        mrna_entry.set_strand(strand);
        mrna_entry.set_phase(0);
        mrna_entry.set_partial_info(true, true);
        entries.push(mrna_entry);

        if let Some(cds) = &self.cds {
            let mut cds_entry = FeatureTblEntry::new();
            cds_entry.set_type("CDS");
            cds_entry.set_name(&cds.name);
            for seg in &cds.segments {
                cds_entry.add_coordinates(seg.span.start, seg.span.end);
            }
            cds_entry.set_strand(strand);
            cds_entry.set_phase(cds.segments.first().map_or(0, |seg| seg.phase));
            cds_entry.set_partial_info(true, true);
            entries.push(cds_entry);
        }

        entries
    }
}

impl Feature for Transcript {
    fn span(&self) -> Span {
        self.span
    }

    fn length(&self) -> i64 {
        self.span.length()
    }

    fn trim_end(&mut self, boundary: i64) {
        if self.span.start > boundary {
            self.span = Span::EMPTY;
        } else if self.span.end > boundary {
            self.span.end = boundary;
            if let Some(exon) = &mut self.exon {
                exon.trim_end(boundary);
            }
            if let Some(cds) = &mut self.cds {
                cds.trim_end(boundary);
            }
        }
    }

    fn adjust_indices(&mut self, delta: i64) {
        self.span.shift(delta);
        if let Some(exon) = &mut self.exon {
            exon.adjust_indices(delta);
        }
        if let Some(cds) = &mut self.cds {
            cds.adjust_indices(delta);
        }
    }

    fn clean_up_indices(&mut self) {
        self.span.clean_up();
        if let Some(exon) = &mut self.exon {
            exon.clean_up_indices();
        }
        if let Some(cds) = &mut self.cds {
            cds.clean_up_indices();
        }
    }

    fn remove_invalid_features(&mut self) {
        if let Some(exon) = &mut self.exon {
            exon.remove_invalid_features();
            if exon.segments.is_empty() {
                self.exon = None;
            }
        }
        if let Some(cds) = &mut self.cds {
            cds.remove_invalid_features();
            if cds.segments.is_empty() {
                self.cds = None;
            }
        }
    }

    fn adjust_phase(&mut self) {
        if let Some(cds) = &mut self.cds {
            cds.adjust_phase();
        }
    }

    fn to_text_record(&self, seq_name: &str, source: &str, strand: Strand) -> String {
        let mut result = format!(
            "{}\t{}\tmRNA\t{}\t{}\t.\t{}\t.\tID={};Name={}\n",
            seq_name, source, self.span.start, self.span.end, strand, self.identifier, self.name
        );
        if let Some(exon) = &self.exon {
            result.push_str(&exon.to_text_record(seq_name, source, strand));
        }
        if let Some(cds) = &self.cds {
            result.push_str(&cds.to_text_record(seq_name, source, strand));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_transcript() -> Transcript {
        let mut transcript = Transcript::new("t1", "transcriptA", Span::new(100, 500));
        let mut exon = Exon::new("e1", "exonA");
        exon.add_segment(Span::new(100, 200));
        exon.add_segment(Span::new(300, 500));
        transcript.set_exon(exon);
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(120, 200), 0);
        cds.add_segment(Span::new(300, 480), 1);
        transcript.set_cds(cds);
        transcript
    }

    #[test]
    fn test_trim_end_propagates_to_parts() {
        let mut transcript = make_transcript();
        transcript.trim_end(400);

        assert_eq!(transcript.span, Span::new(100, 400));
        let exon = transcript.exon.as_ref().unwrap();
        assert_eq!(exon.segments[1], Span::new(300, 400));
        let cds = transcript.cds.as_ref().unwrap();
        assert_eq!(cds.segments[1].span, Span::new(300, 400));
    }

    #[test]
    fn test_trim_end_past_start_collapses_span() {
        let mut transcript = make_transcript();
        transcript.trim_end(50);
        // Defensive branch: the span collapses, the parent removes the
        // whole transcript during the invalid-feature pass.
        assert_eq!(transcript.span, Span::EMPTY);
    }

    #[test]
    fn test_adjust_indices_roundtrip() {
        let mut transcript = make_transcript();
        let original = transcript.clone();
        transcript.adjust_indices(-250);
        transcript.adjust_indices(250);
        assert_eq!(transcript, original);
    }

    #[test]
    fn test_parts_dropped_when_all_segments_invalid() {
        let mut transcript = Transcript::new("t1", "transcriptA", Span::new(1, 100));
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(0, 0), 0);
        transcript.set_cds(cds);

        transcript.remove_invalid_features();
        assert!(transcript.cds.is_none());
    }

    #[test]
    fn test_cds_length_queries() {
        let transcript = make_transcript();
        assert_eq!(transcript.cds_length(), Some(81 + 181));
        assert_eq!(transcript.shortest_cds_segment_length(), Some(81));

        let bare = Transcript::new("t2", "transcriptB", Span::new(1, 10));
        assert_eq!(bare.cds_length(), None);
        assert_eq!(bare.shortest_cds_segment_length(), None);
    }

    #[test]
    fn test_tbl_entries_shapes() {
        let transcript = make_transcript();
        let entries = transcript.to_tbl_entries(Strand::Positive);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].feature_type, "mRNA");
        assert_eq!(entries[0].coordinates.len(), 2);
        assert_eq!(entries[1].feature_type, "CDS");
        assert_eq!(entries[1].coordinates.len(), 2);
        assert_eq!(entries[1].phase, 0);
    }

    #[test]
    fn test_text_record_order() {
        let transcript = make_transcript();
        let text = transcript.to_text_record("chr1", "annotrim", Strand::Positive);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("\tmRNA\t"));
        assert!(lines[1].contains("\texon\t"));
        assert!(lines[3].contains("\tCDS\t"));
    }
}
