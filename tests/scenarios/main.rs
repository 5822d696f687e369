//! End-to-End Condition Scenarios
//!
//! Assembles search and detection stacks from condition JSON, the way a
//! session would, and drives them over small fixed corpora:
//! - search: quality arms, match semantics, elevation placement, hints
//! - detection: fresh sampling, persisted replay, subject hints

#[path = "../common/mod.rs"]
mod common;

mod detection;
mod search;
