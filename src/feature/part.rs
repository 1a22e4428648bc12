//! Multi-segment leaf features: coding regions and exon groups.
//!
//! A part is an ordered list of coordinate segments belonging to one
//! transcript. CDS segments additionally carry a reading-frame phase that
//! must be re-derived whenever trimming clips bases off their left edge.

use serde::{Deserialize, Serialize};

use crate::feature::Feature;
use crate::types::{Span, Strand};

/// One coding segment with its reading-frame phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdsSegment {
    pub span: Span,
    /// Offset in `{0, 1, 2}` of the next codon boundary within the segment.
    pub phase: i64,
}

/// The coding region of a transcript, as an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cds {
    pub identifier: String,
    pub name: String,
    pub segments: Vec<CdsSegment>,
}

impl Cds {
    /// Create a new coding region with no segments.
    pub fn new(identifier: &str, name: &str) -> Self {
        Cds {
            identifier: identifier.to_string(),
            name: name.to_string(),
            segments: Vec::new(),
        }
    }

    /// Append a segment. Insertion order is preserved in output.
    pub fn add_segment(&mut self, span: Span, phase: i64) {
        self.segments.push(CdsSegment { span, phase });
    }

    /// Length of the shortest segment, or `None` if no segments remain.
    pub fn shortest_segment_length(&self) -> Option<i64> {
        self.segments.iter().map(|seg| seg.span.length()).min()
    }
}

impl Feature for Cds {
    fn span(&self) -> Span {
        segment_hull(self.segments.iter().map(|seg| seg.span))
    }

    /// Total coding length, summed over segments.
    fn length(&self) -> i64 {
        self.segments.iter().map(|seg| seg.span.length()).sum()
    }

    fn trim_end(&mut self, boundary: i64) {
        for seg in &mut self.segments {
            trim_segment_end(&mut seg.span, boundary);
        }
    }

    fn adjust_indices(&mut self, delta: i64) {
        for seg in &mut self.segments {
            seg.span.shift(delta);
        }
    }

    fn clean_up_indices(&mut self) {
        for seg in &mut self.segments {
            seg.span.clean_up();
        }
    }

    fn remove_invalid_features(&mut self) {
        self.segments.retain(|seg| seg.span.start != 0);
    }

    /// Bases lost off the left edge rotate the reading frame. Runs after
    /// the shift and before cleanup, while the overhang is still visible.
    fn adjust_phase(&mut self) {
        for seg in &mut self.segments {
            if seg.span.start < 1 {
                seg.phase = (seg.phase + seg.span.start - 1).rem_euclid(3);
            }
        }
    }

    fn to_text_record(&self, seq_name: &str, source: &str, strand: Strand) -> String {
        let mut result = String::new();
        for seg in &self.segments {
            result.push_str(&format!(
                "{}\t{}\tCDS\t{}\t{}\t.\t{}\t{}\tID={};Name={}\n",
                seq_name,
                source,
                seg.span.start,
                seg.span.end,
                strand,
                seg.phase,
                self.identifier,
                self.name
            ));
        }
        result
    }
}

/// The exon group of a transcript, as an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exon {
    pub identifier: String,
    pub name: String,
    pub segments: Vec<Span>,
}

impl Exon {
    /// Create a new exon group with no segments.
    pub fn new(identifier: &str, name: &str) -> Self {
        Exon {
            identifier: identifier.to_string(),
            name: name.to_string(),
            segments: Vec::new(),
        }
    }

    /// Append a segment. Insertion order is preserved in output.
    pub fn add_segment(&mut self, span: Span) {
        self.segments.push(span);
    }
}

impl Feature for Exon {
    fn span(&self) -> Span {
        segment_hull(self.segments.iter().copied())
    }

    fn length(&self) -> i64 {
        self.segments.iter().map(Span::length).sum()
    }

    fn trim_end(&mut self, boundary: i64) {
        for span in &mut self.segments {
            trim_segment_end(span, boundary);
        }
    }

    fn adjust_indices(&mut self, delta: i64) {
        for span in &mut self.segments {
            span.shift(delta);
        }
    }

    fn clean_up_indices(&mut self) {
        for span in &mut self.segments {
            span.clean_up();
        }
    }

    fn remove_invalid_features(&mut self) {
        self.segments.retain(|span| span.start != 0);
    }

    fn to_text_record(&self, seq_name: &str, source: &str, strand: Strand) -> String {
        let mut result = String::new();
        for span in &self.segments {
            result.push_str(&format!(
                "{}\t{}\texon\t{}\t{}\t.\t{}\t.\tID={};Name={}\n",
                seq_name, source, span.start, span.end, strand, self.identifier, self.name
            ));
        }
        result
    }
}

/// Smallest span covering all segments; `(0, 0)` when there are none.
fn segment_hull(segments: impl Iterator<Item = Span>) -> Span {
    let mut hull: Option<Span> = None;
    for span in segments {
        let hull = hull.get_or_insert(span);
        hull.start = hull.start.min(span.start);
        hull.end = hull.end.max(span.end);
    }
    hull.unwrap_or(Span::EMPTY)
}

/// Per-segment end clamp: a segment starting past the boundary is zeroed,
/// one ending past it is cut back to the boundary.
fn trim_segment_end(span: &mut Span, boundary: i64) {
    if span.start > boundary {
        *span = Span::EMPTY;
    } else if span.end > boundary {
        span.end = boundary;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_segment_cds() -> Cds {
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(120, 200), 0);
        cds.add_segment(Span::new(380, 480), 2);
        cds
    }

    #[test]
    fn test_cds_length_sums_segments() {
        let cds = two_segment_cds();
        assert_eq!(cds.length(), 81 + 101);
    }

    #[test]
    fn test_cds_shortest_segment() {
        let cds = two_segment_cds();
        assert_eq!(cds.shortest_segment_length(), Some(81));
        assert_eq!(Cds::new("c2", "empty").shortest_segment_length(), None);
    }

    #[test]
    fn test_cds_span_is_segment_hull() {
        let cds = two_segment_cds();
        assert_eq!(cds.span(), Span::new(120, 480));
        assert_eq!(Cds::new("c2", "empty").span(), Span::EMPTY);
    }

    #[test]
    fn test_trim_end_clamps_and_zeroes() {
        let mut cds = two_segment_cds();
        cds.trim_end(400);
        assert_eq!(cds.segments[0].span, Span::new(120, 200));
        assert_eq!(cds.segments[1].span, Span::new(380, 400));

        cds.trim_end(300);
        assert_eq!(cds.segments[0].span, Span::new(120, 200));
        assert_eq!(cds.segments[1].span, Span::EMPTY);
    }

    #[test]
    fn test_adjust_phase_only_touches_overhangs() {
        let mut cds = two_segment_cds();
        cds.adjust_indices(-149);
        assert_eq!(cds.segments[0].span, Span::new(-29, 51));
        assert_eq!(cds.segments[1].span, Span::new(231, 331));

        cds.adjust_phase();
        // (0 + (-29) - 1).rem_euclid(3) == 0
        assert_eq!(cds.segments[0].phase, 0);
        // in-window segment keeps its phase
        assert_eq!(cds.segments[1].phase, 2);
    }

    #[test]
    fn test_adjust_phase_rotation() {
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(121, 200), 0);
        cds.adjust_indices(-149);
        assert_eq!(cds.segments[0].span, Span::new(-28, 51));

        cds.adjust_phase();
        // 28 bases lost off the left edge: (0 - 28 - 1).rem_euclid(3) == 1
        assert_eq!(cds.segments[0].phase, 1);
    }

    #[test]
    fn test_cleanup_then_invalid_removal_keeps_phases_aligned() {
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(-40, -10), 0);
        cds.add_segment(Span::new(-5, 30), 1);
        cds.add_segment(Span::new(60, 90), 2);

        cds.clean_up_indices();
        assert_eq!(cds.segments[0].span, Span::EMPTY);
        assert_eq!(cds.segments[1].span, Span::new(1, 30));

        cds.remove_invalid_features();
        assert_eq!(cds.segments.len(), 2);
        assert_eq!(cds.segments[0].span, Span::new(1, 30));
        assert_eq!(cds.segments[0].phase, 1);
        assert_eq!(cds.segments[1].span, Span::new(60, 90));
        assert_eq!(cds.segments[1].phase, 2);
    }

    #[test]
    fn test_exon_pipeline() {
        let mut exon = Exon::new("e1", "exonA");
        exon.add_segment(Span::new(100, 200));
        exon.add_segment(Span::new(300, 500));

        exon.trim_end(400);
        exon.adjust_indices(-149);
        exon.clean_up_indices();
        exon.remove_invalid_features();

        assert_eq!(exon.segments, vec![Span::new(1, 51), Span::new(151, 251)]);
        assert_eq!(exon.length(), 51 + 101);
    }

    #[test]
    fn test_cds_text_record_carries_phase_column() {
        let mut cds = Cds::new("c1", "cdsA");
        cds.add_segment(Span::new(10, 40), 2);
        let record = cds.to_text_record("chr1", "annotrim", Strand::Negative);
        assert_eq!(record, "chr1\tannotrim\tCDS\t10\t40\t.\t-\t2\tID=c1;Name=cdsA\n");
    }

    #[test]
    fn test_exon_text_record() {
        let mut exon = Exon::new("e1", "exonA");
        exon.add_segment(Span::new(1, 51));
        let record = exon.to_text_record("chr1", "annotrim", Strand::Positive);
        assert_eq!(record, "chr1\tannotrim\texon\t1\t51\t.\t+\t.\tID=e1;Name=exonA\n");
    }
}
