//! Determinism Tests
//!
//! The same corpus and condition must behave identically across repeated
//! calls and across separately built stacks:
//! - ranking: repeated queries, rebuilt indexes, seeded elevation
//! - labels: repeatable sampling at exact targets, replayed label maps

#[path = "../common/mod.rs"]
mod common;

mod ranking;
