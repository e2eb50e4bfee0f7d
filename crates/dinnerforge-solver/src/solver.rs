//! Solver driver.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use dinnerforge_config::SolverConfig;
use dinnerforge_core::{
    Assignment, CandidateSet, DinnerForgeError, DinnerProblem, HardSoftScore, Result, Schedule,
    SectionLayout,
};
use rand::Rng;
use tracing::{debug, info};

use crate::encoder::ScheduleEncoder;
use crate::engine::PropagationBackend;
use crate::model::{ModelStatistics, SearchBudget, SolveStatus, SolverBackend};
use crate::statistics::SearchStatistics;

/// A schedule the backend found.
#[derive(Debug, Clone)]
pub struct SolvedSchedule {
    pub assignment: Assignment,
    pub schedule: Schedule,
    /// Number of historical pairs that meet again.
    pub objective: i64,
    /// `Optimal` or `Feasible`.
    pub status: SolveStatus,
    pub score: HardSoftScore,
    pub statistics: SearchStatistics,
    pub model: ModelStatistics,
}

/// Why no schedule was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSolutionReason {
    /// The search proved that no schedule satisfies the rules.
    Infeasible,
    /// The budget ran out before any schedule was found.
    BudgetExhausted,
}

/// Result of a solve call. Not finding a schedule is a normal outcome.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Solved(SolvedSchedule),
    NoSolutionFound {
        reason: NoSolutionReason,
        statistics: SearchStatistics,
    },
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn solved(&self) -> Option<&SolvedSchedule> {
        match self {
            SolveOutcome::Solved(solved) => Some(solved),
            SolveOutcome::NoSolutionFound { .. } => None,
        }
    }

    pub fn into_solved(self) -> Option<SolvedSchedule> {
        match self {
            SolveOutcome::Solved(solved) => Some(solved),
            SolveOutcome::NoSolutionFound { .. } => None,
        }
    }

    pub fn statistics(&self) -> &SearchStatistics {
        match self {
            SolveOutcome::Solved(solved) => &solved.statistics,
            SolveOutcome::NoSolutionFound { statistics, .. } => statistics,
        }
    }
}

/// Generates candidates, encodes them, runs the backend and reads the
/// schedule back.
///
/// # Example
///
/// ```
/// use dinnerforge_config::{EnvironmentMode, SolverConfig};
/// use dinnerforge_core::{DinnerProblem, Roster};
/// use dinnerforge_solver::{ScheduleSolver, SolveOutcome};
///
/// let roster = Roster::new((0..9).map(|i| format!("house {}", i))).unwrap();
/// let config = SolverConfig::new()
///     .with_environment_mode(EnvironmentMode::Reproducible)
///     .with_termination_seconds(60);
///
/// match ScheduleSolver::new(config).solve(&DinnerProblem::new(roster)).unwrap() {
///     SolveOutcome::Solved(solved) => assert_eq!(solved.objective, 0),
///     SolveOutcome::NoSolutionFound { reason, .. } => panic!("no schedule: {:?}", reason),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleSolver {
    config: SolverConfig,
    backend: Arc<dyn SolverBackend>,
    terminate: Option<Arc<AtomicBool>>,
}

impl Default for ScheduleSolver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl ScheduleSolver {
    /// Solver using the built-in [`PropagationBackend`].
    pub fn new(config: SolverConfig) -> Self {
        ScheduleSolver {
            config,
            backend: Arc::new(PropagationBackend::new()),
            terminate: None,
        }
    }

    pub fn with_backend<B: SolverBackend + 'static>(mut self, backend: B) -> Self {
        self.backend = Arc::new(backend);
        self
    }

    /// Setting the flag stops the search; the best schedule so far is kept.
    pub fn with_terminate(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate = Some(flag);
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Budget derived from the configuration and this machine.
    pub fn budget(&self) -> SearchBudget {
        let available = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let seed = self
            .config
            .resolve_random_seed()
            .unwrap_or_else(|| rand::rng().random());

        let mut budget = SearchBudget::default()
            .with_time_limit(self.config.effective_time_limit())
            .with_worker_count(self.config.resolve_worker_count(available))
            .with_random_seed(seed);
        if let Some(nodes) = self.config.node_count_limit() {
            budget = budget.with_node_limit(nodes);
        }
        if let Some(objective) = self.config.best_objective_limit() {
            budget = budget.with_objective_limit(objective);
        }
        if let Some(flag) = &self.terminate {
            budget = budget.with_terminate(Arc::clone(flag));
        }
        budget
    }

    /// Solves the problem.
    ///
    /// # Errors
    ///
    /// - `Config` when the configuration is invalid or the participant
    ///   count does not split into three sections
    /// - `DomainModel` when candidates and problem disagree
    /// - `Solver` when the backend fails or returns an assignment that does
    ///   not hold up
    pub fn solve(&self, problem: &DinnerProblem) -> Result<SolveOutcome> {
        self.config
            .validate()
            .map_err(|e| DinnerForgeError::Config(e.to_string()))?;

        let layout = match self.config.section_size {
            Some(size) => SectionLayout::with_section_size(problem.participant_count(), size)?,
            None => problem.layout()?,
        };
        let candidates = CandidateSet::generate(problem)?;
        let budget = self.budget();

        info!(
            event = "solve_start",
            participant_count = problem.participant_count(),
            candidate_count = candidates.len(),
            historical_pair_count = problem.historical_pairs().len(),
            previous_host_count = problem.previous_hosting().len(),
            worker_count = budget.worker_count,
            time_limit_secs = budget.time_limit.as_secs(),
            backend = self.backend.name(),
        );

        let encoding = ScheduleEncoder::new().encode(problem, &candidates)?;
        let model_stats = encoding.model().statistics();
        info!(
            event = "encode_end",
            variables = model_stats.variable_count,
            constraints = model_stats.constraint_count,
            placements = encoding.placements().len(),
            objective_terms = model_stats.objective_term_count,
        );
        for (category, count) in &model_stats.constraints_by_category {
            debug!(event = "constraint_family", category = *category, count = *count);
        }

        let result = self.backend.solve(encoding.model(), &budget)?;

        let outcome = match result.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                let values = result.values.ok_or_else(|| {
                    DinnerForgeError::Solver(format!(
                        "backend reported {} without an assignment",
                        result.status
                    ))
                })?;
                if values.len() != encoding.model().variable_count() {
                    return Err(DinnerForgeError::Solver(format!(
                        "backend returned {} values for {} variables",
                        values.len(),
                        encoding.model().variable_count()
                    )));
                }
                if let Some(violated) = encoding.model().first_violation(&values) {
                    return Err(DinnerForgeError::Solver(format!(
                        "backend assignment violates {}",
                        violated
                    )));
                }
                let assignment = encoding.decode(&values)?;
                let schedule = assignment.to_schedule(problem.roster(), &layout)?;

                let objective = assignment.historical_reuse(problem.historical_pairs()) as i64;
                if result.objective.is_some_and(|o| o != objective) {
                    debug!(
                        event = "objective_mismatch",
                        backend_objective = ?result.objective,
                        reused_pairs = objective,
                    );
                }

                SolveOutcome::Solved(SolvedSchedule {
                    assignment,
                    schedule,
                    objective,
                    status: result.status,
                    score: HardSoftScore::of_soft(-objective),
                    statistics: result.statistics,
                    model: model_stats,
                })
            }
            SolveStatus::Infeasible => SolveOutcome::NoSolutionFound {
                reason: NoSolutionReason::Infeasible,
                statistics: result.statistics,
            },
            SolveStatus::Unknown => SolveOutcome::NoSolutionFound {
                reason: NoSolutionReason::BudgetExhausted,
                statistics: result.statistics,
            },
        };

        let stats = outcome.statistics();
        match &outcome {
            SolveOutcome::Solved(solved) => info!(
                event = "solve_end",
                status = %solved.status,
                objective = solved.objective,
                score = %solved.score,
                feasible = solved.score.is_feasible(),
                nodes = stats.node_count,
                duration_ms = stats.duration.as_millis() as u64,
            ),
            SolveOutcome::NoSolutionFound { reason, .. } => info!(
                event = "solve_end",
                status = ?reason,
                feasible = false,
                nodes = stats.node_count,
                duration_ms = stats.duration.as_millis() as u64,
            ),
        }

        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
