//! Termination conditions for the search.

mod best_objective;
mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;
use std::time::Duration;

pub use best_objective::BestObjectiveTermination;
pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Snapshot of the search state that terminations look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    pub elapsed: Duration,
    /// Nodes explored by all workers.
    pub node_count: u64,
    /// Best objective found so far by any worker.
    pub best_objective: Option<i64>,
}

/// Trait for determining when to stop searching.
pub trait Termination: Send + Sync + Debug {
    /// Returns true if the search should stop.
    fn is_terminated(&self, progress: &SearchProgress) -> bool;
}

/// An absent condition never terminates.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, progress: &SearchProgress) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(progress))
    }
}
