//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};

use super::{SearchProgress, Termination};

/// Terminates when an external flag is set.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::time::Duration;
/// use dinnerforge_solver::termination::{ExternalTermination, SearchProgress, Termination};
///
/// let flag = AtomicBool::new(false);
/// let term = ExternalTermination::new(&flag);
/// let progress = SearchProgress { elapsed: Duration::ZERO, node_count: 0, best_objective: None };
///
/// assert!(!term.is_terminated(&progress));
/// flag.store(true, Ordering::SeqCst);
/// assert!(term.is_terminated(&progress));
/// ```
#[derive(Debug)]
pub struct ExternalTermination<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ExternalTermination<'a> {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: &'a AtomicBool) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination<'_> {
    fn is_terminated(&self, _progress: &SearchProgress) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
