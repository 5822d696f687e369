//! Mailsim - search and commitment simulators for controlled inbox experiments
//!
//! Mailsim drives the system-behavior arms of an inbox-assistant experiment:
//! ranked or unranked search with optional promoted-result splicing, and
//! commitment detectors whose apparent precision and recall are sampled to
//! target levels.
//!
//! # Quick Start
//!
//! ```
//! use mailsim::{build_search_engine, Email, SearchCondition, SearchEngine, SearchQuality};
//!
//! # fn main() -> mailsim::Result<()> {
//! let messages = vec![Email::compose(
//!     "m-0",
//!     "Jane Doe <jane@corp.io>",
//!     &["Team <team@corp.io>"],
//!     "Quarterly review",
//!     "Slides attached.",
//! )?];
//!
//! let condition = SearchCondition {
//!     quality: SearchQuality::Standard,
//!     stable: true,
//!     promoted: Vec::new(),
//!     augmented: None,
//! };
//! let engine = build_search_engine(&messages, &condition);
//!
//! let outcome = engine.search("review", false);
//! assert_eq!(outcome.results, vec![0]);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! Engines are assembled once per experimental condition over a fixed
//! corpus and then frozen; sessions interact only through the
//! [`SearchEngine`] and [`CommitmentEngine`] traits. Conditions
//! deserialize straight from task JSON via [`assembly`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembly;

pub use assembly::{
    apply_hints, build_commitment_engine, build_search_engine, DetectAssembly, DetectCondition,
    DetectQuality, SearchCondition, SearchQuality,
};
// The member crates share no item names, but `engine` modules on both sides
// rule out glob re-exports
pub use mailsim_core::{
    convert_raw_commitments, convert_raw_emails, Address, Commitment, CommitmentMap,
    CommitmentStatus, ElevationSummary, Email, Error, Paragraph, RawCommitment, RawEmail,
    RawSegment, Result, SearchOutcome, Segment, SegmentKind, Span,
};
pub use mailsim_detect::{
    CommitmentEngine, KeywordCommitmentEngine, MappedCommitmentEngine, MaskedCommitmentEngine,
    NullCommitmentEngine, PriorityCommitment,
};
pub use mailsim_search::{
    ngram_windows, seeded_draw, token_highlighter, tokenize, AugmentedIndex, ElevationWrapper,
    Highlighter, IndexConfig, InvertedIndex, NgramSearchEngine, PostingEntry, RegexSearchEngine,
    SearchEngine,
};
