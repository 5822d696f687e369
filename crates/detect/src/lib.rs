//! Commitment detection for mailsim
//!
//! This crate provides:
//! - engine: the CommitmentEngine trait with null, keyword, and mapped
//!   implementations
//! - masked: the masked wrapper that samples labels to hit precision and
//!   recall targets
//!
//! Detectors run over the same immutable corpus as the search engines and
//! report commitments keyed by message id.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod masked;

pub use engine::{
    CommitmentEngine, KeywordCommitmentEngine, MappedCommitmentEngine, NullCommitmentEngine,
    PriorityCommitment,
};
pub use masked::MaskedCommitmentEngine;
