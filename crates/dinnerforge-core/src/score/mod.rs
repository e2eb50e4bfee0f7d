//! Score type for representing schedule quality
//!
//! A schedule is judged on two levels: broken hard constraints and reused
//! historical pairs. Both levels are stored as non-positive penalties so
//! that a higher score is always better.

mod hard_soft;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;

use thiserror::Error;

/// Error returned when a score string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse score '{input}': {reason}")]
pub struct ScoreParseError {
    pub input: String,
    pub reason: String,
}

impl ScoreParseError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
