//! Commitment model
//!
//! This module provides:
//! - CommitmentStatus: pending / accepted / rejected / conflict
//! - Commitment: a calendar-worthy obligation extracted from a message
//! - CommitmentMap: email id to commitment
//! - RawCommitment: raw JSON form and its conversion

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

// ============================================================================
// Commitment
// ============================================================================

/// Lifecycle state of a commitment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentStatus {
    /// Not yet answered
    Pending,
    /// Accepted by the user
    Accepted,
    /// Rejected by the user
    Rejected,
    /// Clashes with another accepted commitment
    Conflict,
}

/// A calendar-worthy obligation extracted from a message
#[derive(Debug, Clone, PartialEq)]
pub struct Commitment {
    /// Display name, usually derived from the subject
    pub name: String,
    /// Scheduled time, if one is known
    pub time: Option<DateTime<Utc>>,
    /// Lifecycle state
    pub status: CommitmentStatus,
    /// Whether the entry was synthesized rather than genuinely labeled
    pub flagged: bool,
}

impl Commitment {
    /// Create a pending, unflagged commitment with no scheduled time
    pub fn pending(name: impl Into<String>) -> Self {
        Commitment {
            name: name.into(),
            time: None,
            status: CommitmentStatus::Pending,
            flagged: false,
        }
    }

    /// Builder: set the scheduled time
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Builder: set the lifecycle state
    pub fn with_status(mut self, status: CommitmentStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder: set the synthesized flag
    pub fn with_flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }
}

/// Email id to its extracted commitment
pub type CommitmentMap = HashMap<String, Commitment>;

// ============================================================================
// Raw JSON form
// ============================================================================

/// Raw JSON commitment as stored in task definitions
///
/// Raw entries are always genuine; the `flagged` marker only ever comes
/// from masked synthesis at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCommitment {
    /// Display name
    pub name: String,
    /// RFC 3339 scheduled time; empty or absent means none
    #[serde(default)]
    pub time: String,
    /// Lifecycle state
    pub status: CommitmentStatus,
}

impl TryFrom<RawCommitment> for Commitment {
    type Error = Error;

    fn try_from(raw: RawCommitment) -> Result<Self> {
        let time = if raw.time.is_empty() {
            None
        } else {
            Some(
                DateTime::parse_from_rfc3339(&raw.time)
                    .map_err(|_| Error::TimeParse {
                        field: "commitment time",
                        value: raw.time.clone(),
                    })?
                    .with_timezone(&Utc),
            )
        };
        Ok(Commitment {
            name: raw.name,
            time,
            status: raw.status,
            flagged: false,
        })
    }
}

/// Convert a raw commitment map into the typed model
///
/// Fails on the first unparseable scheduled time.
pub fn convert_raw_commitments(
    raw: HashMap<String, RawCommitment>,
) -> Result<CommitmentMap> {
    raw.into_iter()
        .map(|(id, c)| Ok((id, Commitment::try_from(c)?)))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
