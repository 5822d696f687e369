//! Core types for mailsim
//!
//! This crate defines the foundational types shared by the engine crates:
//! - Address, Segment, Email: the immutable message model
//! - RawEmail / RawCommitment: raw JSON forms and their conversions
//! - Commitment: detected event labels with status and optional time
//! - Span, SearchOutcome, ElevationSummary: search contract types
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commitment;
pub mod email;
pub mod error;
pub mod search_types;

// Re-export commonly used types
pub use commitment::{
    convert_raw_commitments, Commitment, CommitmentMap, CommitmentStatus, RawCommitment,
};
pub use email::{
    convert_raw_emails, Address, Email, Paragraph, RawEmail, RawSegment, Segment, SegmentKind,
};
pub use error::{Error, Result};
pub use search_types::{ElevationSummary, SearchOutcome, Span};
