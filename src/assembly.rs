//! Condition assembly
//!
//! This module provides:
//! - SearchQuality / SearchCondition: the search arm of a condition
//! - build_search_engine: compose the search stack for a condition
//! - DetectQuality / DetectCondition: the detection arm of a condition
//! - build_commitment_engine: compose the detection stack, sampling fresh
//!   labels or replaying persisted ones
//! - apply_hints: subject prefixes for hinted conditions
//!
//! Conditions deserialize straight from experiment task JSON. Corpora are
//! keyed by position, so a condition must be assembled over the same
//! message list the session renders.

use mailsim_core::{convert_raw_commitments, Email, RawCommitment, Result};
use mailsim_detect::{
    CommitmentEngine, MappedCommitmentEngine, MaskedCommitmentEngine, NullCommitmentEngine,
};
use mailsim_search::{
    AugmentedIndex, ElevationWrapper, NgramSearchEngine, RegexSearchEngine, SearchEngine,
};
use serde::Deserialize;
use std::collections::HashMap;

fn default_true() -> bool {
    true
}

// ============================================================================
// Search conditions
// ============================================================================

/// Ranking quality arm for the search task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchQuality {
    /// Unranked substring matching, no elevation
    Baseline,
    /// Ranked retrieval with far-end elevation
    Standard,
    /// Ranked retrieval with near-top elevation
    Full,
}

/// Search arm of an experimental condition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCondition {
    /// Quality arm
    pub quality: SearchQuality,
    /// Stable elevation placement; defaults to true
    #[serde(default = "default_true")]
    pub stable: bool,
    /// Ids of messages to promote in ranked results
    #[serde(default)]
    pub promoted: Vec<String>,
    /// External relevance hints merged into the index
    #[serde(default)]
    pub augmented: Option<AugmentedIndex>,
}

/// Compose the search engine for a condition
///
/// The baseline arm is a bare substring engine. The ranked arms build an
/// n-gram engine, merge any hints, and wrap it in an elevation layer with
/// the condition's promoted ids resolved to corpus positions; ids not in
/// the corpus are dropped.
pub fn build_search_engine(
    messages: &[Email],
    condition: &SearchCondition,
) -> Box<dyn SearchEngine> {
    if condition.quality == SearchQuality::Baseline {
        tracing::info!(
            target: "mailsim::search",
            documents = messages.len(),
            "Assembled baseline search"
        );
        return Box::new(RegexSearchEngine::new(messages));
    }
    let mut engine = NgramSearchEngine::new(messages);
    if let Some(augmented) = &condition.augmented {
        engine = engine.with_augmented(augmented);
    }
    let promoted: Vec<usize> = messages
        .iter()
        .enumerate()
        .filter(|(_, message)| condition.promoted.contains(&message.id))
        .map(|(doc, _)| doc)
        .collect();
    let reversed = condition.quality != SearchQuality::Full;
    tracing::info!(
        target: "mailsim::search",
        documents = messages.len(),
        promoted = promoted.len(),
        reversed,
        stable = condition.stable,
        "Assembled ranked search"
    );
    Box::new(
        ElevationWrapper::new(Box::new(engine), promoted)
            .with_reversed(reversed)
            .with_stable(condition.stable),
    )
}

// ============================================================================
// Detection conditions
// ============================================================================

/// Detection quality arm for the commitment task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectQuality {
    /// No detection at all
    Baseline,
    /// Balanced sampling at 0.8 precision and recall
    Stable,
    /// Exact sampling at full precision and recall
    VariableHigh,
    /// Noisy sampling at 0.6 precision and recall
    VariableLow,
}

impl DetectQuality {
    /// Precision and recall targets for the sampled label list
    ///
    /// `None` for the baseline arm, which never trains.
    pub fn targets(&self) -> Option<(f64, f64)> {
        match self {
            DetectQuality::Baseline => None,
            DetectQuality::Stable => Some((0.8, 0.8)),
            DetectQuality::VariableHigh => Some((1.0, 1.0)),
            DetectQuality::VariableLow => Some((0.6, 0.6)),
        }
    }
}

/// Detection arm of an experimental condition
///
/// Commitments stay in raw form so conditions parse straight from task
/// JSON; [`build_commitment_engine`] owns the fallible time conversion.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectCondition {
    /// Quality arm
    pub quality: DetectQuality,
    /// Prefix subjects of detected messages with a reminder
    #[serde(default)]
    pub hinted: bool,
    /// Ground-truth commitments keyed by message id
    #[serde(default)]
    pub commitments: HashMap<String, RawCommitment>,
}

/// A composed detection stack
pub struct DetectAssembly {
    /// The engine sessions extract through
    pub engine: Box<dyn CommitmentEngine>,
    /// Ids selected by fresh training, for persistence and later replay;
    /// `None` when nothing was trained
    pub selected_ids: Option<Vec<String>>,
}

// `engine` is a boxed trait object without `Debug`, so the derive is
// unavailable
impl std::fmt::Debug for DetectAssembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectAssembly")
            .field("selected_ids", &self.selected_ids)
            .finish_non_exhaustive()
    }
}

/// Compose the commitment engine for a condition
///
/// With `persisted` ids the mask is recovered over exactly those messages,
/// replaying an earlier session's labels; otherwise a fresh selection is
/// sampled at the quality arm's targets and its ids are reported back for
/// persistence.
pub fn build_commitment_engine(
    messages: &[Email],
    condition: &DetectCondition,
    persisted: Option<&[String]>,
) -> Result<DetectAssembly> {
    let (precision, recall) = match condition.quality.targets() {
        Some(targets) => targets,
        None => {
            tracing::info!(target: "mailsim::detect", "Assembled baseline detection");
            return Ok(DetectAssembly {
                engine: Box::new(NullCommitmentEngine),
                selected_ids: None,
            });
        }
    };
    let truth = convert_raw_commitments(condition.commitments.clone())?;
    let mut engine = MaskedCommitmentEngine::new(Box::new(MappedCommitmentEngine::new(truth)));
    let selected_ids = match persisted {
        Some(ids) => {
            let recovered: Vec<Email> = messages
                .iter()
                .filter(|message| ids.contains(&message.id))
                .cloned()
                .collect();
            engine.recover(&recovered);
            tracing::info!(
                target: "mailsim::detect",
                recovered = recovered.len(),
                "Assembled detection from persisted labels"
            );
            None
        }
        None => {
            let selection = engine.train(messages, precision, recall)?;
            tracing::info!(
                target: "mailsim::detect",
                precision,
                recall,
                selected = selection.len(),
                "Assembled detection with fresh sampling"
            );
            Some(selection.into_iter().map(|email| email.id).collect())
        }
    };
    Ok(DetectAssembly {
        engine: Box::new(engine),
        selected_ids,
    })
}

/// Prefix the subject of every detected message with a save-the-date hint
///
/// Detection is checked before the prefix is applied, and the input
/// messages are left untouched.
pub fn apply_hints(messages: &[Email], engine: &dyn CommitmentEngine) -> Vec<Email> {
    messages
        .iter()
        .map(|message| {
            let mut message = message.clone();
            if engine.extract(&message).is_some() {
                message.subject = format!("Save the date: {}", message.subject);
            }
            message
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
