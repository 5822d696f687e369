//! Inverted n-gram index over an email corpus
//!
//! This module provides:
//! - IndexConfig: n-gram and abbreviation window limits
//! - PostingEntry: one document's statistics under one key
//! - InvertedIndex: the key to posting-list map with augmentation
//! - AugmentedIndex: external keyword to message-id relevance hints
//!
//! Subjects are indexed together with the sender's display name at double
//! weight; bodies at single weight. Every window up to the abbreviation
//! limit also contributes an initials key when its first and last tokens
//! are capitalized, and single fully-uppercase tokens keep a case-exact
//! key alongside the usual lowercase one.

use crate::tokenizer::{ngram_windows, tokenize};
use mailsim_core::Email;
use std::collections::HashMap;

// ============================================================================
// Configuration
// ============================================================================

/// Window limits for index construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Widest window joined into a phrase key
    pub index_max_ngram: usize,
    /// Widest window reduced to an initials key
    pub abbrev_max_ngram: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            index_max_ngram: 2,
            abbrev_max_ngram: 4,
        }
    }
}

/// External relevance hints: keyword to the message ids it should surface
pub type AugmentedIndex = HashMap<String, Vec<String>>;

// ============================================================================
// Posting entries
// ============================================================================

/// One document's statistics under one index key
#[derive(Debug, Clone, PartialEq)]
pub struct PostingEntry {
    /// Document index in the corpus
    pub doc: usize,
    /// Accumulated weighted occurrences of the key in the document
    pub tf: f32,
    /// Weighted token length of the document
    pub doc_len: f32,
    /// Flat score bonus for augmented entries
    pub boost: Option<f32>,
}

// ============================================================================
// Inverted index
// ============================================================================

/// Key to posting-list map built over a fixed corpus
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<PostingEntry>>,
    corpus_len: usize,
    config: IndexConfig,
}

impl InvertedIndex {
    /// Build the index over a corpus
    ///
    /// Documents are keyed by their position in `messages`; that position is
    /// the index the search engines report.
    pub fn build(messages: &[Email], config: IndexConfig) -> Self {
        let max_n = config.index_max_ngram.max(config.abbrev_max_ngram);
        let mut postings: HashMap<String, Vec<PostingEntry>> = HashMap::new();
        for (doc, message) in messages.iter().enumerate() {
            let subject_full = format!("{} {}", message.subject, message.from.full_name);
            let subject_tokens = tokenize(&subject_full);
            let body_full = message.body_text();
            let body_tokens = tokenize(&body_full);
            let doc_len = (subject_tokens.len() * 2 + body_tokens.len()) as f32;
            for (tokens, weight) in [(&subject_tokens, 2.0), (&body_tokens, 1.0)] {
                for window in ngram_windows(tokens, max_n) {
                    index_window(&mut postings, window, &config, doc, doc_len, weight);
                }
            }
        }
        tracing::info!(
            target: "mailsim::index",
            documents = messages.len(),
            keys = postings.len(),
            "Built inverted index"
        );
        InvertedIndex {
            postings,
            corpus_len: messages.len(),
            config,
        }
    }

    /// Merge external relevance hints into the index
    ///
    /// Each hinted message gains a boosted entry under the keyword. The
    /// posting list is created before the id is resolved, so a keyword whose
    /// ids are all unknown still resolves exactly (to an empty list) rather
    /// than falling through to prefix matching.
    pub fn augment(&mut self, augmented: &AugmentedIndex, messages: &[Email]) {
        for (keyword, ids) in augmented {
            for id in ids {
                let list = self.postings.entry(keyword.clone()).or_default();
                let doc = match messages.iter().position(|m| &m.id == id) {
                    Some(doc) => doc,
                    None => {
                        tracing::warn!(
                            target: "mailsim::index",
                            keyword = %keyword,
                            id = %id,
                            "Augmented entry references an unknown message id"
                        );
                        continue;
                    }
                };
                list.push(PostingEntry {
                    doc,
                    tf: 1.0,
                    doc_len: 1.0,
                    boost: Some(1.0),
                });
            }
        }
    }

    /// Posting list for an exact key
    pub fn lookup(&self, key: &str) -> Option<&[PostingEntry]> {
        self.postings.get(key).map(Vec::as_slice)
    }

    /// All keys with their posting lists, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[PostingEntry])> {
        self.postings
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// Number of documents the index was built over
    pub fn corpus_len(&self) -> usize {
        self.corpus_len
    }

    /// Number of distinct keys
    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    /// Window limits the index was built with
    pub fn config(&self) -> IndexConfig {
        self.config
    }
}

// ============================================================================
// Window keying
// ============================================================================

fn index_window(
    postings: &mut HashMap<String, Vec<PostingEntry>>,
    window: &[&str],
    config: &IndexConfig,
    doc: usize,
    doc_len: f32,
    weight: f32,
) {
    if window.len() <= config.index_max_ngram {
        bump(postings, window.join(" ").to_lowercase(), doc, doc_len, weight);
    }
    if window.len() > 1
        && window.len() <= config.abbrev_max_ngram
        && starts_uppercase(window[0])
        && starts_uppercase(window[window.len() - 1])
    {
        let initials: String = window
            .iter()
            .filter_map(|token| token.chars().next())
            .collect::<String>()
            .to_lowercase();
        bump(postings, initials, doc, doc_len, weight);
    }
    if window.len() == 1 && is_all_uppercase(window[0]) {
        bump(postings, window[0].to_string(), doc, doc_len, weight);
    }
}

fn bump(
    postings: &mut HashMap<String, Vec<PostingEntry>>,
    key: String,
    doc: usize,
    doc_len: f32,
    weight: f32,
) {
    let list = postings.entry(key).or_default();
    // Documents are indexed in ascending order, so this document's entry can
    // only be the last one in the list.
    match list.last_mut() {
        Some(entry) if entry.doc == doc => entry.tf += weight,
        _ => list.push(PostingEntry {
            doc,
            tf: weight,
            doc_len,
            boost: None,
        }),
    }
}

/// Tokens are ASCII alphanumerics and hyphens; digits and hyphens count as
/// capitalized, only a lowercase letter disqualifies.
fn starts_uppercase(token: &str) -> bool {
    token
        .chars()
        .next()
        .map_or(false, |c| !c.is_ascii_lowercase())
}

fn is_all_uppercase(token: &str) -> bool {
    !token.chars().any(|c| c.is_ascii_lowercase())
}

// ============================================================================
// Tests
// ============================================================================
