//! Propagation-based branch-and-bound backend.
//!
//! Each worker runs a depth-first search over the boolean variables with
//! bound propagation on every linear constraint and chronological
//! backtracking. The objective is carried as one more constraint whose
//! upper bound drops below every solution found, so the search proves
//! optimality (or infeasibility) when a worker exhausts its tree.
//!
//! Workers run on a dedicated rayon pool and share only the incumbent,
//! the bounds and the stop flag. They differ in their tie-break order.

mod incumbent;
mod propagator;
mod search;

#[cfg(test)]
mod tests;

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};

use dinnerforge_core::{DinnerForgeError, Result};
use rayon::ThreadPoolBuilder;
use tracing::debug;

use crate::model::{BackendResult, LinearModel, SearchBudget, SolveStatus, SolverBackend};
use crate::statistics::StatisticsCollector;
use incumbent::SharedSearch;
use propagator::CompiledModel;
use search::{Worker, WorkerExit};

/// Nodes between two termination checks of a worker.
pub const DEFAULT_CHECK_INTERVAL: u64 = 256;

/// The built-in [`SolverBackend`].
///
/// # Examples
///
/// ```
/// use dinnerforge_solver::{
///     LinearExpr, LinearModel, PropagationBackend, SearchBudget, SolveStatus, SolverBackend,
/// };
///
/// let mut model = LinearModel::new();
/// let vars: Vec<_> = (0..3).map(|_| model.new_bool_var()).collect();
/// model.add_eq("pick", "exactly two", LinearExpr::sum(vars.clone()), 2);
/// model.minimize(
///     LinearExpr::new()
///         .with_term(vars[0], 4)
///         .with_term(vars[1], 1)
///         .with_term(vars[2], 2),
/// );
///
/// let result = PropagationBackend::new().solve(&model, &SearchBudget::default()).unwrap();
/// assert_eq!(result.status, SolveStatus::Optimal);
/// assert_eq!(result.objective, Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct PropagationBackend {
    check_interval: u64,
}

impl Default for PropagationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PropagationBackend {
    pub fn new() -> Self {
        PropagationBackend {
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Sets how many nodes a worker explores between termination checks.
    pub fn with_check_interval(mut self, nodes: u64) -> Self {
        self.check_interval = nodes.max(1);
        self
    }
}

impl SolverBackend for PropagationBackend {
    fn name(&self) -> &str {
        "propagation"
    }

    fn solve(&self, model: &LinearModel, budget: &SearchBudget) -> Result<BackendResult> {
        let compiled = CompiledModel::compile(model)?;
        let worker_count = budget.worker_count.max(1);
        let stats = StatisticsCollector::new(worker_count);
        let shared = SharedSearch::new(compiled.objective_floor());

        debug!(
            event = "backend_start",
            backend = self.name(),
            variables = compiled.var_count(),
            constraints = compiled.constraint_count(),
            workers = worker_count,
            seed = budget.random_seed,
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|i| format!("dinnerforge-worker-{}", i))
            .build()
            .map_err(|e| DinnerForgeError::Solver(format!("cannot start search workers: {}", e)))?;

        let exits: Mutex<Vec<std::result::Result<WorkerExit, String>>> =
            Mutex::new(Vec::with_capacity(worker_count));
        let check_interval = self.check_interval;

        pool.scope(|s| {
            for id in 0..worker_count {
                let (compiled, shared, stats, exits) = (&compiled, &shared, &stats, &exits);
                s.spawn(move |_| {
                    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                        Worker::new(id, compiled, shared, stats, budget, check_interval).run()
                    }))
                    .map_err(|payload| panic_message(payload.as_ref()));
                    if outcome.is_err() {
                        shared.request_stop();
                    }
                    exits
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .push(outcome);
                });
            }
        });

        let exits = exits.into_inner().unwrap_or_else(PoisonError::into_inner);
        let mut proven = shared.is_proven();
        for exit in &exits {
            match exit {
                Ok(exit) => proven |= exit.is_proof(),
                Err(message) => {
                    return Err(DinnerForgeError::Solver(format!(
                        "search worker panicked: {}",
                        message
                    )));
                }
            }
        }

        let incumbent = shared.take_incumbent();
        if let Some(incumbent) = &incumbent {
            if incumbent.objective <= shared.lower_bound() {
                proven = true;
            }
            if let Some(violated) = model.first_violation(&incumbent.values) {
                return Err(DinnerForgeError::Solver(format!(
                    "worker {} produced an assignment violating {}",
                    incumbent.worker, violated
                )));
            }
        }

        let status = match (incumbent.is_some(), proven) {
            (true, true) => SolveStatus::Optimal,
            (true, false) => SolveStatus::Feasible,
            (false, true) => SolveStatus::Infeasible,
            (false, false) => SolveStatus::Unknown,
        };
        let statistics = stats.snapshot();

        debug!(
            event = "backend_end",
            backend = self.name(),
            status = %status,
            nodes = statistics.node_count,
            conflicts = statistics.conflict_count,
            solutions = statistics.solution_count,
            duration_ms = statistics.duration.as_millis() as u64,
        );

        Ok(BackendResult {
            status,
            objective: incumbent.as_ref().map(|i| i.objective),
            values: incumbent.map(|i| i.values),
            statistics,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
