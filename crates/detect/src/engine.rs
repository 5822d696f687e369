//! Commitment extraction engines
//!
//! This module provides:
//! - CommitmentEngine: the common extraction interface
//! - NullCommitmentEngine: extracts nothing
//! - KeywordCommitmentEngine: keyword matching over subject and body
//! - MappedCommitmentEngine: ground-truth lookups from a prepared map
//!
//! Extraction is per message and stateless; the sampling behaviors live in
//! the masked wrapper.

use chrono::{DateTime, Utc};
use mailsim_core::{Commitment, CommitmentMap, Email};
use once_cell::sync::Lazy;
use regex::Regex;

/// Terms that mark a message as carrying a commitment
static KEYWORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)meet|event|chat").unwrap());

// ============================================================================
// Engine interface
// ============================================================================

/// A commitment singled out as most urgent
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityCommitment {
    /// Position of the carrying message in the evaluated list
    pub index: usize,
    /// The extracted commitment
    pub commitment: Commitment,
}

/// Extracts commitments from messages
///
/// # Thread Safety
///
/// Engines must be `Send + Sync`; every implementation here extracts
/// without mutating shared state.
pub trait CommitmentEngine: Send + Sync {
    /// The commitment a message carries, if any
    fn extract(&self, email: &Email) -> Option<Commitment>;

    /// The most urgent commitment across messages, relative to `now`
    ///
    /// Reserved surface; no current engine prioritizes.
    fn find_priority(
        &self,
        _emails: &[Email],
        _now: DateTime<Utc>,
    ) -> Option<PriorityCommitment> {
        None
    }
}

// ============================================================================
// Null engine
// ============================================================================

/// Extracts nothing from any message
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCommitmentEngine;

impl CommitmentEngine for NullCommitmentEngine {
    fn extract(&self, _email: &Email) -> Option<Commitment> {
        None
    }
}

// ============================================================================
// Keyword engine
// ============================================================================

/// Flags messages whose subject or body mentions meeting-like terms
///
/// A hit anywhere produces a pending commitment named after the subject
/// line, with no scheduled time.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCommitmentEngine;

impl CommitmentEngine for KeywordCommitmentEngine {
    fn extract(&self, email: &Email) -> Option<Commitment> {
        let hit = KEYWORDS.is_match(&email.subject)
            || email
                .body
                .iter()
                .any(|paragraph| paragraph.iter().any(|segment| KEYWORDS.is_match(&segment.text)));
        hit.then(|| Commitment::pending(email.subject.clone()))
    }
}

// ============================================================================
// Mapped engine
// ============================================================================

/// Looks commitments up in a prepared ground-truth map
///
/// An entry with an empty name is reported under the message's subject;
/// the stored map itself is never modified.
#[derive(Debug, Clone, Default)]
pub struct MappedCommitmentEngine {
    commitments: CommitmentMap,
}

impl MappedCommitmentEngine {
    /// Build the engine over a ground-truth map
    pub fn new(commitments: CommitmentMap) -> Self {
        MappedCommitmentEngine { commitments }
    }
}

impl CommitmentEngine for MappedCommitmentEngine {
    fn extract(&self, email: &Email) -> Option<Commitment> {
        let mut commitment = self.commitments.get(&email.id)?.clone();
        if commitment.name.is_empty() {
            commitment.name = email.subject.clone();
        }
        Some(commitment)
    }
}

// ============================================================================
// Tests
// ============================================================================
