//! Shared search result types
//!
//! This module provides:
//! - Span: a highlight region inside a subject line
//! - SearchOutcome: document indices plus whether a query actually ran
//! - ElevationSummary: where promoted documents landed in a ranking

use serde::Serialize;

// ============================================================================
// Spans
// ============================================================================

/// A highlight region inside a piece of text, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the first highlighted byte
    pub start: usize,
    /// Length of the region in bytes
    pub length: usize,
}

impl Span {
    /// Create a span
    pub fn new(start: usize, length: usize) -> Self {
        Span { start, length }
    }

    /// Byte offset one past the last highlighted byte
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

// ============================================================================
// Search outcomes
// ============================================================================

/// Result of running a query against a corpus
///
/// Results are document indices into the corpus the engine was built over.
/// `searched` distinguishes a real query from the blank-query identity
/// listing, which callers render differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Whether a non-blank query was evaluated
    pub searched: bool,
    /// Matching document indices
    pub results: Vec<usize>,
}

impl SearchOutcome {
    /// The blank-query outcome: every document, in corpus order
    pub fn unfiltered(corpus_len: usize) -> Self {
        SearchOutcome {
            searched: false,
            results: (0..corpus_len).collect(),
        }
    }

    /// A real query outcome
    pub fn filtered(results: Vec<usize>) -> Self {
        SearchOutcome {
            searched: true,
            results,
        }
    }
}

// ============================================================================
// Elevation summaries
// ============================================================================

/// Where each promoted document landed in a ranking
///
/// One entry per promoted document, in promotion order; `None` means the
/// document fell out of the result list entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElevationSummary {
    /// Final position of each promoted document
    pub promoted_positions: Vec<Option<usize>>,
}

// ============================================================================
// Tests
// ============================================================================
