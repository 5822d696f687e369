//! Match highlighting
//!
//! This module provides:
//! - Highlighter: a reusable closure mapping text to highlight spans
//! - token_highlighter: the shared per-token highlighter every engine hands out
//!
//! Highlighting is independent of ranking: each query token is matched
//! literally and case-insensitively wherever it occurs, then overlapping
//! spans are reduced to a non-overlapping set.

use mailsim_core::Span;
use regex::RegexBuilder;

/// Maps a piece of text to the spans a renderer should emphasize
pub type Highlighter = Box<dyn Fn(&str) -> Vec<Span> + Send + Sync>;

// ============================================================================
// Token highlighter
// ============================================================================

/// Build a highlighter for a query
///
/// Every tokenized query term becomes a literal case-insensitive matcher.
/// Spans are byte offsets into the text, sorted by start with longer spans
/// winning ties; a span overlapping an already-kept span is dropped.
pub fn token_highlighter(query: &str) -> Highlighter {
    let matchers: Vec<regex::Regex> = crate::tokenizer::tokenize(query.trim())
        .into_iter()
        .filter_map(|token| {
            RegexBuilder::new(&regex::escape(token))
                .case_insensitive(true)
                .build()
                .ok()
        })
        .collect();
    Box::new(move |text: &str| {
        let mut spans: Vec<Span> = Vec::new();
        for matcher in &matchers {
            for found in matcher.find_iter(text) {
                spans.push(Span::new(found.start(), found.end() - found.start()));
            }
        }
        spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.length.cmp(&a.length)));
        let mut end = 0;
        spans.retain(|span| {
            if span.start >= end {
                end = span.end();
                true
            } else {
                false
            }
        });
        spans
    })
}

// ============================================================================
// Tests
// ============================================================================
