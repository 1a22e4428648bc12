//! Output records for trimmed annotation hierarchies.
//!
//! This module contains the feature-table entry record built by
//! [`Gene::to_tbl_entries`](crate::Gene::to_tbl_entries) and a writer
//! helper for GFF-style text.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::AnnotrimError;
use crate::feature::Gene;
use crate::types::{Span, Strand};

/// One entry of a feature table, assembled field by field by the feature
/// hierarchy during [`Gene::to_tbl_entries`](crate::Gene::to_tbl_entries).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureTblEntry {
    pub feature_type: String,
    pub name: String,
    pub seq_name: String,
    /// Coordinate pairs, one per segment, in insertion order.
    pub coordinates: Vec<Span>,
    pub strand: Strand,
    pub phase: i64,
    pub has_start: bool,
    pub has_stop: bool,
}

impl FeatureTblEntry {
    /// Create an empty entry; fields are filled in by the setters below.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_type(&mut self, feature_type: &str) {
        self.feature_type = feature_type.to_string();
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn set_seq_name(&mut self, seq_name: &str) {
        self.seq_name = seq_name.to_string();
    }

    /// Append one coordinate pair.
    pub fn add_coordinates(&mut self, start: i64, end: i64) {
        self.coordinates.push(Span::new(start, end));
    }

    pub fn set_strand(&mut self, strand: Strand) {
        self.strand = strand;
    }

    pub fn set_phase(&mut self, phase: i64) {
        self.phase = phase;
    }

    /// Record whether the feature carries a start and a stop codon.
    pub fn set_partial_info(&mut self, has_start: bool, has_stop: bool) {
        self.has_start = has_start;
        self.has_stop = has_stop;
    }
}

/// Write a gene's GFF-style text records to `writer`.
pub fn write_gff<W: Write>(writer: &mut W, gene: &Gene) -> Result<(), AnnotrimError> {
    write!(writer, "{}", gene.to_gff())?;
    Ok(())
}
