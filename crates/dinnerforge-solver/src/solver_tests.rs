//! Tests for the solver driver.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use dinnerforge_config::EnvironmentMode;
use dinnerforge_core::{DinnerProblem, PreviousHosting};
use dinnerforge_test::{nine, problem};
use dinnerforge_verify::ScheduleVerifier;

use super::*;
use crate::model::{BackendResult, LinearModel};

fn config(seconds: u64) -> SolverConfig {
    SolverConfig::new()
        .with_environment_mode(EnvironmentMode::Reproducible)
        .with_termination_seconds(seconds)
}

fn solve(problem: &DinnerProblem, config: SolverConfig) -> SolvedSchedule {
    match ScheduleSolver::new(config).solve(problem).unwrap() {
        SolveOutcome::Solved(solved) => solved,
        SolveOutcome::NoSolutionFound { reason, .. } => panic!("no schedule: {:?}", reason),
    }
}

fn assert_verifies(problem: &DinnerProblem, solved: &SolvedSchedule) {
    let report = ScheduleVerifier::new(
        problem.roster(),
        problem.previous_hosting(),
        problem.historical_pairs(),
    )
    .verify(&solved.schedule);
    assert!(report.all_valid(), "{}", report);
    assert_eq!(report.historical_reuse_count() as i64, solved.objective);
}

#[test]
fn test_nine_without_history_is_optimal() {
    let problem = problem(9);
    let solved = solve(&problem, config(60));

    assert_eq!(solved.status, SolveStatus::Optimal);
    assert_eq!(solved.objective, 0);
    assert_eq!(solved.score, HardSoftScore::ZERO);
    assert_eq!(solved.assignment.len(), 9);
    assert_eq!(solved.schedule.len(), 9);
    assert_verifies(&problem, &solved);
}

#[test]
fn test_avoidable_history_is_avoided() {
    let problem = problem(9).with_historical_pairs(nine::history_of(&[[0, 1, 2], [3, 4, 5]]));
    let solved = solve(&problem, config(60));

    assert_eq!(solved.status, SolveStatus::Optimal);
    assert_eq!(solved.objective, 0);
    assert_verifies(&problem, &solved);
}

#[test]
fn test_history_is_minimized_without_objective_limit() {
    let problem = problem(9).with_historical_pairs(nine::history_of(&nine::SLOTS[..3]));
    for seed in 0..4 {
        let solved = solve(&problem, config(60).with_random_seed(seed));

        assert_eq!(solved.status, SolveStatus::Optimal, "seed {}", seed);
        assert_eq!(solved.objective, 0, "seed {}", seed);
        assert_verifies(&problem, &solved);
    }
}

#[test]
fn test_unavoidable_history_is_counted() {
    // Every pair met last time, so every schedule reuses all 27 of its pairs.
    let problem = problem(9).with_historical_pairs(nine::history_of(&nine::all_lines()));
    let solved = solve(&problem, config(60).with_best_objective_limit(27));

    assert_eq!(solved.objective, 27);
    assert_eq!(solved.score, HardSoftScore::of(0, -27));
    assert_verifies(&problem, &solved);
}

#[test]
fn test_previous_hosting_is_respected() {
    let mut hosting = PreviousHosting::new();
    for p in 0..9 {
        hosting.insert(p, p % 3);
    }
    let problem = problem(9).with_previous_hosting(hosting);
    let solved = solve(&problem, config(60));

    let layout = problem.layout().unwrap();
    for (slot, triplet) in solved.assignment.slots().iter().enumerate() {
        assert_ne!(triplet.host() % 3, layout.section_of(slot));
    }
    assert_verifies(&problem, &solved);
}

#[test]
fn test_three_participants_are_infeasible() {
    let outcome = ScheduleSolver::new(config(10)).solve(&problem(3)).unwrap();
    assert!(matches!(
        outcome,
        SolveOutcome::NoSolutionFound {
            reason: NoSolutionReason::Infeasible,
            ..
        }
    ));
}

#[test]
fn test_six_participants_are_not_solved() {
    // Each participant would need six distinct partners out of five.
    let outcome = ScheduleSolver::new(config(20)).solve(&problem(6)).unwrap();
    assert!(!outcome.is_solved());
}

#[test]
fn test_participant_count_must_divide_into_sections() {
    let result = ScheduleSolver::new(config(10)).solve(&problem(10));
    assert!(matches!(result, Err(DinnerForgeError::Config(_))));
}

#[test]
fn test_configured_section_size_must_match() {
    let result = ScheduleSolver::new(config(10).with_section_size(4)).solve(&problem(9));
    assert!(matches!(result, Err(DinnerForgeError::Config(_))));

    let solved = solve(&problem(9), config(60).with_section_size(3));
    assert_eq!(solved.objective, 0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = ScheduleSolver::new(config(10).with_worker_count(0)).solve(&problem(9));
    assert!(matches!(result, Err(DinnerForgeError::Config(_))));
}

#[test]
fn test_external_termination_exhausts_budget() {
    let flag = Arc::new(AtomicBool::new(true));
    let outcome = ScheduleSolver::new(config(60))
        .with_terminate(flag)
        .solve(&problem(9))
        .unwrap();
    assert!(matches!(
        outcome,
        SolveOutcome::NoSolutionFound {
            reason: NoSolutionReason::BudgetExhausted,
            ..
        }
    ));
}

#[test]
fn test_budget_from_config() {
    let solver = ScheduleSolver::new(
        SolverConfig::new()
            .with_random_seed(5)
            .with_worker_count(3)
            .with_node_count_limit(1000),
    );
    let budget = solver.budget();
    assert_eq!(budget.worker_count, 3);
    assert_eq!(budget.random_seed, 5);
    assert_eq!(budget.node_limit, Some(1000));
    assert_eq!(budget.time_limit, dinnerforge_config::DEFAULT_TIME_LIMIT);

    let reproducible = ScheduleSolver::new(config(5).with_worker_count(3));
    assert_eq!(reproducible.budget().worker_count, 1);
}

/// Backend that claims success without a usable assignment.
#[derive(Debug)]
struct BrokenBackend {
    values: Option<Vec<bool>>,
}

impl SolverBackend for BrokenBackend {
    fn name(&self) -> &str {
        "broken"
    }

    fn solve(&self, model: &LinearModel, _budget: &SearchBudget) -> Result<BackendResult> {
        Ok(BackendResult {
            status: SolveStatus::Feasible,
            values: self
                .values
                .clone()
                .map(|v| if v.is_empty() { vec![false; model.variable_count()] } else { v }),
            objective: Some(0),
            statistics: SearchStatistics::default(),
        })
    }
}

#[test]
fn test_backend_without_values_is_an_error() {
    let result = ScheduleSolver::new(config(10))
        .with_backend(BrokenBackend { values: None })
        .solve(&problem(9));
    assert!(matches!(result, Err(DinnerForgeError::Solver(_))));
}

#[test]
fn test_backend_violating_model_is_an_error() {
    let solver = ScheduleSolver::new(config(10)).with_backend(BrokenBackend {
        values: Some(Vec::new()),
    });
    assert_eq!(solver.backend_name(), "broken");
    let result = solver.solve(&problem(9));
    assert!(matches!(result, Err(DinnerForgeError::Solver(_))));
}
