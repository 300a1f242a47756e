//! Shared DTOs (schemas-as-code) for the screenfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk (`run.json`).
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod outcome;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const SCREENFIX_RUN_V1: &str = "screenfix.run.v1";
}
