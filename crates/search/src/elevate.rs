//! Result elevation
//!
//! This module provides:
//! - seeded_draw: deterministic jitter derived from a query seed
//! - ElevationWrapper: promotes chosen documents in another engine's results
//!
//! The wrapper intercepts ranked results and splices the promoted documents
//! back in as one contiguous block, leaving result membership untouched. In
//! stable mode the splice point is a pure function of the query and the
//! original ranking; in unstable mode it also draws on ambient randomness.

use crate::engine::SearchEngine;
use crate::highlight::Highlighter;
use mailsim_core::{ElevationSummary, SearchOutcome};

// ============================================================================
// Seeded draw
// ============================================================================

/// Deterministic pseudo-random draw in `0..=max`
///
/// The fractional part of `sin(seed * 7919) * 10000` is matched against the
/// cutoffs `1 - 3^-(i+1)`, so smaller values are geometrically more likely.
/// The result depends only on the inputs.
pub fn seeded_draw(seed: usize, max: usize) -> usize {
    let h = (seed as f64 * 7919.0).sin() * 10000.0;
    let r = h - h.floor();
    for i in 0..max {
        let cutoff = 1.0 - 1.0 / 3f64.powi(i as i32 + 1);
        if r < cutoff {
            return i;
        }
    }
    max
}

// ============================================================================
// Elevation wrapper
// ============================================================================

/// Promotes a fixed set of documents in another engine's results
///
/// Blank queries pass through untouched, as do result lists containing no
/// promoted document. The promoted block keeps the order the documents had
/// in the underlying ranking.
pub struct ElevationWrapper {
    inner: Box<dyn SearchEngine>,
    elevated: Vec<usize>,
    reversed: bool,
    stable: bool,
    variance: usize,
}

impl ElevationWrapper {
    /// Wrap an engine, promoting the given document indices
    ///
    /// Defaults: forward placement, stable mode, variance 3.
    pub fn new(inner: Box<dyn SearchEngine>, elevated: Vec<usize>) -> Self {
        ElevationWrapper {
            inner,
            elevated,
            reversed: false,
            stable: true,
            variance: 3,
        }
    }

    /// Builder: place the promoted block from the far end instead
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Builder: switch between stable and unstable placement
    pub fn with_stable(mut self, stable: bool) -> Self {
        self.stable = stable;
        self
    }

    /// Builder: set the jitter bound used by the seeded draw
    pub fn with_variance(mut self, variance: usize) -> Self {
        self.variance = variance;
        self
    }

    fn elevate(&self, results: Vec<usize>, seed: usize) -> Vec<usize> {
        let (elevated, others): (Vec<usize>, Vec<usize>) = results
            .iter()
            .copied()
            .partition(|doc| self.elevated.contains(doc));
        if elevated.is_empty() {
            return results;
        }
        let position = if self.stable {
            let noise = seeded_draw(seed, self.variance);
            let first = results
                .iter()
                .position(|doc| self.elevated.contains(doc))
                .unwrap_or(results.len());
            let inject = first.min(noise);
            if self.reversed {
                // Everything before the first promoted hit is unpromoted,
                // so inject never exceeds others
                others.len() - inject
            } else {
                inject
            }
        } else {
            let target = if self.reversed {
                if rand::random::<bool>() {
                    seeded_draw(seed, self.variance) as i64
                } else {
                    results.len() as i64 - seeded_draw(seed, self.variance) as i64
                }
            } else {
                (3 + seeded_draw(seed, 2)) as i64
            };
            resolve_position(target, others.len())
        };
        splice(others, elevated, position)
    }
}

impl SearchEngine for ElevationWrapper {
    fn search(&self, query: &str, quick: bool) -> SearchOutcome {
        let outcome = self.inner.search(query, quick);
        if !outcome.searched {
            return outcome;
        }
        let seed = query.trim().chars().count();
        let results = self.elevate(outcome.results, seed);
        tracing::debug!(
            target: "mailsim::elevate",
            seed,
            promoted = self.elevated.len(),
            "Spliced promoted documents"
        );
        SearchOutcome::filtered(results)
    }

    fn create_highlighter(&self, query: &str) -> Highlighter {
        self.inner.create_highlighter(query)
    }

    fn summarize(&self, results: &[usize]) -> Option<ElevationSummary> {
        Some(ElevationSummary {
            promoted_positions: self
                .elevated
                .iter()
                .map(|doc| results.iter().position(|r| r == doc))
                .collect(),
        })
    }
}

/// Clamp a possibly-negative splice target to a valid position, counting
/// negative targets from the end of the list
fn resolve_position(target: i64, len: usize) -> usize {
    if target < 0 {
        (len as i64 + target).max(0) as usize
    } else {
        (target as usize).min(len)
    }
}

fn splice(mut others: Vec<usize>, elevated: Vec<usize>, position: usize) -> Vec<usize> {
    let tail = others.split_off(position.min(others.len()));
    others.extend(elevated);
    others.extend(tail);
    others
}

// ============================================================================
// Tests
// ============================================================================
