//! Error types for mailsim
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The engines favor silent degradation over failure: empty queries, unknown
//! promoted ids, and missing commitments are all normal outcomes. Errors are
//! reserved for malformed corpus data and invalid training targets.

use thiserror::Error;

/// Result type alias for mailsim operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the mailsim engines
#[derive(Debug, Error)]
pub enum Error {
    /// Address string is not in `Name <email>` form
    #[error("Address {0:?} cannot be parsed")]
    AddressParse(String),

    /// Timestamp in raw input could not be parsed
    #[error("Invalid {field} timestamp: {value:?}")]
    TimeParse {
        /// Field the timestamp came from
        field: &'static str,
        /// Offending input value
        value: String,
    },

    /// Training target outside its valid range
    #[error("Invalid {name} target: {value}")]
    InvalidTarget {
        /// Target name ("precision" or "recall")
        name: &'static str,
        /// Offending value
        value: f64,
    },
}
