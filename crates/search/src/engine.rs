//! Search engines
//!
//! This module provides:
//! - SearchEngine: the common query interface
//! - RegexSearchEngine: unranked substring matching
//! - NgramSearchEngine: ranked n-gram retrieval with prefix fallback
//!
//! Both engines are built over a fixed corpus and report results as
//! document indices into that corpus.

use crate::highlight::{token_highlighter, Highlighter};
use crate::index::{AugmentedIndex, IndexConfig, InvertedIndex, PostingEntry};
use crate::tokenizer::{ngram_windows, tokenize};
use mailsim_core::{ElevationSummary, Email, SearchOutcome};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Query keys shorter than this fall back to prefix matching
const PREFIX_MATCH_LIMIT: usize = 10;

// ============================================================================
// Engine interface
// ============================================================================

/// A query engine over a fixed email corpus
///
/// Results are document indices into the corpus the engine was built over.
///
/// # Thread Safety
///
/// Engines are immutable once assembled and must be `Send + Sync` so a
/// session can be shared across threads.
pub trait SearchEngine: Send + Sync {
    /// Run a query
    ///
    /// A query with no tokens produces the unfiltered corpus listing with
    /// `searched` false. `quick` disables prefix fallback in engines that
    /// support it.
    fn search(&self, query: &str, quick: bool) -> SearchOutcome;

    /// Build a highlighter for the query's tokens
    fn create_highlighter(&self, query: &str) -> Highlighter;

    /// Positions of externally promoted documents in a result list
    ///
    /// Engines that do not promote anything return `None`.
    fn summarize(&self, _results: &[usize]) -> Option<ElevationSummary> {
        None
    }
}

// ============================================================================
// Regex engine
// ============================================================================

/// Unranked substring search
///
/// Matches each query token case-insensitively anywhere in the subject or
/// in any body segment, and reports matching documents in corpus order.
#[derive(Debug)]
pub struct RegexSearchEngine {
    messages: Vec<Email>,
}

impl RegexSearchEngine {
    /// Build the engine over a corpus
    pub fn new(messages: &[Email]) -> Self {
        RegexSearchEngine {
            messages: messages.to_vec(),
        }
    }
}

impl SearchEngine for RegexSearchEngine {
    fn search(&self, query: &str, _quick: bool) -> SearchOutcome {
        let tokens: Vec<String> = tokenize(query.trim())
            .into_iter()
            .map(|token| regex::escape(&token.to_lowercase()))
            .collect();
        if tokens.is_empty() {
            return SearchOutcome::unfiltered(self.messages.len());
        }
        let pattern = format!("(?i)({})", tokens.join("|"));
        let matcher = match regex::Regex::new(&pattern) {
            Ok(matcher) => matcher,
            Err(err) => {
                tracing::warn!(
                    target: "mailsim::search",
                    %err,
                    "Query pattern failed to compile"
                );
                return SearchOutcome::filtered(Vec::new());
            }
        };
        let results = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, message)| {
                matcher.is_match(&message.subject)
                    || message.body.iter().any(|paragraph| {
                        paragraph.iter().any(|segment| matcher.is_match(&segment.text))
                    })
            })
            .map(|(doc, _)| doc)
            .collect();
        SearchOutcome::filtered(results)
    }

    fn create_highlighter(&self, query: &str) -> Highlighter {
        token_highlighter(query)
    }
}

// ============================================================================
// N-gram engine
// ============================================================================

/// Ranked n-gram retrieval
///
/// Query windows are resolved against the inverted index case-exactly,
/// then lowercased, then (unless `quick`) as a prefix of any key. Window
/// contributions are weighted by `3^(n-1)` and summed per document;
/// membership in the score map is what makes a document a result, so even
/// zero-scored matches are reported.
pub struct NgramSearchEngine {
    messages: Vec<Email>,
    index: InvertedIndex,
    sort: bool,
}

impl NgramSearchEngine {
    /// Build the engine with default window limits
    pub fn new(messages: &[Email]) -> Self {
        Self::with_config(messages, IndexConfig::default())
    }

    /// Build the engine with explicit window limits
    pub fn with_config(messages: &[Email], config: IndexConfig) -> Self {
        NgramSearchEngine {
            messages: messages.to_vec(),
            index: InvertedIndex::build(messages, config),
            sort: true,
        }
    }

    /// Builder: enable or disable relevance ordering
    ///
    /// With ordering disabled, results come back in ascending document
    /// order regardless of score.
    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    /// Builder: merge external relevance hints into the index
    pub fn with_augmented(mut self, augmented: &AugmentedIndex) -> Self {
        self.index.augment(augmented, &self.messages);
        self
    }

    fn window_scores(&self, terms: &[&str], partial: bool) -> BTreeMap<usize, f32> {
        let key = terms.join(" ");
        let mut scores = BTreeMap::new();
        if let Some(list) = self.index.lookup(&key) {
            credit(&mut scores, list, self.index.corpus_len());
            return scores;
        }
        let lowered = key.to_lowercase();
        if let Some(list) = self.index.lookup(&lowered) {
            credit(&mut scores, list, self.index.corpus_len());
            return scores;
        }
        if partial && key.len() < PREFIX_MATCH_LIMIT {
            // Walks every key; corpora are session-sized. A trie would be
            // the upgrade path past a few thousand keys.
            for (candidate, list) in self.index.entries() {
                if candidate.to_lowercase().starts_with(&lowered) {
                    credit(&mut scores, list, self.index.corpus_len());
                }
            }
        }
        scores
    }
}

impl SearchEngine for NgramSearchEngine {
    fn search(&self, query: &str, quick: bool) -> SearchOutcome {
        let normalized = tokenize(query.trim());
        if normalized.is_empty() {
            return SearchOutcome::unfiltered(self.index.corpus_len());
        }
        let mut scores: BTreeMap<usize, f32> = BTreeMap::new();
        for window in ngram_windows(&normalized, self.index.config().index_max_ngram) {
            let weight = 3f32.powi(window.len() as i32 - 1);
            for (doc, score) in self.window_scores(window, !quick) {
                *scores.entry(doc).or_insert(0.0) += score * weight;
            }
        }
        let mut results: Vec<usize> = scores.keys().copied().collect();
        if self.sort {
            // Stable sort: ties keep ascending document order
            results.sort_by(|a, b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
        }
        tracing::debug!(
            target: "mailsim::search",
            query = %query,
            matches = results.len(),
            quick,
            "Ranked query"
        );
        SearchOutcome::filtered(results)
    }

    fn create_highlighter(&self, query: &str) -> Highlighter {
        token_highlighter(query)
    }
}

fn credit(scores: &mut BTreeMap<usize, f32>, list: &[PostingEntry], corpus_len: usize) {
    for entry in list {
        let score = scores.entry(entry.doc).or_insert(0.0);
        *score += (entry.tf / entry.doc_len) * (corpus_len as f32 / list.len() as f32).ln();
        if let Some(boost) = entry.boost {
            *score += boost;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
