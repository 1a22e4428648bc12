//! Core coordinate types for annotrim.
//!
//! This module contains the span and strand primitives used throughout the
//! feature hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An inclusive, 1-based coordinate pair.
///
/// `(0, 0)` is the sentinel for "feature removed". Endpoints are signed
/// because the begin-trim reindexing step shifts coordinates below 1 before
/// the cleanup pass corrects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    /// The sentinel span of a fully removed feature.
    pub const EMPTY: Span = Span { start: 0, end: 0 };

    /// Create a new inclusive span.
    pub fn new(start: i64, end: i64) -> Self {
        Span { start, end }
    }

    /// Number of coordinates covered, `|end - start| + 1`.
    ///
    /// Defined even for the empty sentinel; callers that care must check
    /// [`Span::is_empty`] first. Used for reporting only.
    pub fn length(&self) -> i64 {
        (self.end - self.start).abs() + 1
    }

    /// True iff this span is the `(0, 0)` sentinel.
    pub fn is_empty(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// True iff this span overlaps the inclusive interval `[start, end]`.
    pub fn overlaps(&self, start: i64, end: i64) -> bool {
        start <= self.end && end >= self.start
    }

    /// Add `delta` to both endpoints. No validity checks.
    pub fn shift(&mut self, delta: i64) {
        self.start += delta;
        self.end += delta;
    }

    /// Normalize after a shift: a span entirely before coordinate 1
    /// collapses to the sentinel, a partial left overhang is clamped to 1.
    pub fn clean_up(&mut self) {
        if self.end < 1 {
            *self = Span::EMPTY;
        } else if self.start < 1 {
            self.start = 1;
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Strand orientation for genomic features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Positive,
    Negative,
    /// Unstranded or unknown, rendered as `.` in output.
    #[default]
    Unknown,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+', '-', or '.'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            "." => Ok(Strand::Unknown),
            _ => Err(ParseStrandError),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
            Strand::Unknown => ".",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
