//! Objective-based termination.

use super::{SearchProgress, Termination};

/// Terminates when the best objective reaches the target or lower.
///
/// Useful when a known lower bound cannot be proven by the search itself.
#[derive(Debug, Clone)]
pub struct BestObjectiveTermination {
    target: i64,
}

impl BestObjectiveTermination {
    pub fn new(target: i64) -> Self {
        Self { target }
    }
}

impl Termination for BestObjectiveTermination {
    fn is_terminated(&self, progress: &SearchProgress) -> bool {
        progress.best_objective.is_some_and(|o| o <= self.target)
    }
}
