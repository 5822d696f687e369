//! Masked wrapper with precision/recall sampling
//!
//! This module provides:
//! - MaskedCommitmentEngine: exposes another engine's labels only for a
//!   chosen subset of messages
//!
//! The wrapper holds a mask map from message id to commitment. `recover`
//! fills the map for explicit messages; `train` samples a selection that
//! hits precision and recall targets against the base engine's labels and
//! recovers exactly that selection. Extraction then reads the mask map
//! alone, so unselected messages look commitment-free.

use crate::engine::CommitmentEngine;
use mailsim_core::{Commitment, CommitmentMap, Email, Error, Result};
use rand::seq::SliceRandom;

// ============================================================================
// Masked engine
// ============================================================================

/// Masks a base engine behind a sampled label map
///
/// Intended as construct-then-freeze: run one `train` or `recover` while the
/// wrapper is still exclusively owned, then share it as a plain
/// [`CommitmentEngine`].
pub struct MaskedCommitmentEngine {
    base: Box<dyn CommitmentEngine>,
    mask_map: CommitmentMap,
}

impl MaskedCommitmentEngine {
    /// Wrap a base engine with an empty mask
    pub fn new(base: Box<dyn CommitmentEngine>) -> Self {
        MaskedCommitmentEngine {
            base,
            mask_map: CommitmentMap::new(),
        }
    }

    /// Label the given messages in the mask map
    ///
    /// Messages the base engine labels keep that label; the rest get a
    /// synthesized pending commitment named after their subject and marked
    /// `flagged`. Existing entries for other messages are left alone.
    pub fn recover(&mut self, emails: &[Email]) {
        for email in emails {
            let commitment = match self.base.extract(email) {
                Some(commitment) => commitment,
                None => Commitment::pending(email.subject.clone()).with_flagged(true),
            };
            self.mask_map.insert(email.id.clone(), commitment);
        }
        tracing::debug!(
            target: "mailsim::detect",
            labeled = self.mask_map.len(),
            "Recovered mask entries"
        );
    }

    /// Sample a selection hitting the precision and recall targets
    ///
    /// Messages are split by whether the base engine labels them. A random
    /// `recall` share of the labeled pool is selected, then unlabeled
    /// messages are added until the labeled share of the selection drops to
    /// `precision`, bounded by the unlabeled pool. The selection is
    /// recovered into the mask map and returned.
    ///
    /// `precision` must be in `(0, 1]` and `recall` in `[0, 1]`.
    pub fn train(&mut self, emails: &[Email], precision: f64, recall: f64) -> Result<Vec<Email>> {
        if !(precision > 0.0 && precision <= 1.0) {
            return Err(Error::InvalidTarget {
                name: "precision",
                value: precision,
            });
        }
        if !(0.0..=1.0).contains(&recall) {
            return Err(Error::InvalidTarget {
                name: "recall",
                value: recall,
            });
        }
        let (mut positives, mut negatives): (Vec<&Email>, Vec<&Email>) = emails
            .iter()
            .partition(|email| self.base.extract(email).is_some());
        let mut rng = rand::thread_rng();
        positives.shuffle(&mut rng);
        negatives.shuffle(&mut rng);

        let pos = ((recall * positives.len() as f64).round() as usize).min(positives.len());
        let neg = ((pos as f64 * (1.0 - precision) / precision).ceil() as usize)
            .min(negatives.len());
        let selection: Vec<Email> = positives
            .iter()
            .take(pos)
            .chain(negatives.iter().take(neg))
            .map(|&email| email.clone())
            .collect();
        self.recover(&selection);
        tracing::debug!(
            target: "mailsim::detect",
            positives = pos,
            negatives = neg,
            "Sampled training selection"
        );
        Ok(selection)
    }

    /// Number of labeled messages in the mask map
    pub fn label_count(&self) -> usize {
        self.mask_map.len()
    }
}

impl CommitmentEngine for MaskedCommitmentEngine {
    fn extract(&self, email: &Email) -> Option<Commitment> {
        self.mask_map.get(&email.id).cloned()
    }
}

// ============================================================================
// Tests
// ============================================================================
