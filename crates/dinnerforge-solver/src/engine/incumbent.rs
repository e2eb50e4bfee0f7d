//! State shared by all search workers.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Best solution found so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Incumbent {
    pub(crate) objective: i64,
    pub(crate) values: Vec<bool>,
    pub(crate) worker: usize,
}

/// Incumbent, bounds and stop flags shared between workers.
///
/// `best` mirrors the incumbent objective so workers can read the bound
/// without locking; `i64::MAX` means no solution yet.
#[derive(Debug)]
pub(crate) struct SharedSearch {
    best: AtomicI64,
    lower_bound: AtomicI64,
    incumbent: Mutex<Option<Incumbent>>,
    stop: AtomicBool,
    proven: AtomicBool,
}

impl SharedSearch {
    pub(crate) fn new(objective_floor: i64) -> Self {
        SharedSearch {
            best: AtomicI64::new(i64::MAX),
            lower_bound: AtomicI64::new(objective_floor),
            incumbent: Mutex::new(None),
            stop: AtomicBool::new(false),
            proven: AtomicBool::new(false),
        }
    }

    /// Best objective so far, or `i64::MAX`.
    pub(crate) fn best_objective(&self) -> i64 {
        self.best.load(Ordering::Acquire)
    }

    pub(crate) fn best(&self) -> Option<i64> {
        match self.best_objective() {
            i64::MAX => None,
            objective => Some(objective),
        }
    }

    pub(crate) fn lower_bound(&self) -> i64 {
        self.lower_bound.load(Ordering::Acquire)
    }

    /// Raises the proven lower bound on the objective.
    pub(crate) fn raise_lower_bound(&self, bound: i64) {
        self.lower_bound.fetch_max(bound, Ordering::AcqRel);
    }

    /// Stores the solution if it beats the incumbent. Returns whether it did.
    pub(crate) fn offer(&self, objective: i64, values: Vec<bool>, worker: usize) -> bool {
        let mut incumbent = self.incumbent.lock().unwrap_or_else(PoisonError::into_inner);
        if incumbent.as_ref().is_some_and(|i| i.objective <= objective) {
            return false;
        }
        *incumbent = Some(Incumbent {
            objective,
            values,
            worker,
        });
        self.best.store(objective, Ordering::Release);
        true
    }

    pub(crate) fn take_incumbent(&self) -> Option<Incumbent> {
        self.incumbent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub(crate) fn request_stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    pub(crate) fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// The incumbent (or its absence) is proven optimal; everyone stops.
    pub(crate) fn mark_proven(&self) {
        self.proven.store(true, Ordering::Release);
        self.request_stop();
    }

    pub(crate) fn is_proven(&self) -> bool {
        self.proven.load(Ordering::Acquire)
    }
}
