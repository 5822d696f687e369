//! Search engines for mailsim
//!
//! This crate provides:
//! - tokenizer: shared query and document tokenization
//! - index: the inverted n-gram index with external augmentation
//! - engine: the SearchEngine trait plus regex and n-gram engines
//! - highlight: per-token match highlighting
//! - elevate: promoted-document splicing around any engine
//!
//! Engines are assembled once per experiment session over a fixed corpus
//! and report results as document indices into that corpus.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod elevate;
pub mod engine;
pub mod highlight;
pub mod index;
pub mod tokenizer;

pub use elevate::{seeded_draw, ElevationWrapper};
pub use engine::{NgramSearchEngine, RegexSearchEngine, SearchEngine};
pub use highlight::{token_highlighter, Highlighter};
pub use index::{AugmentedIndex, IndexConfig, InvertedIndex, PostingEntry};
pub use tokenizer::{ngram_windows, tokenize};
