//! Tests for the propagation backend.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::model::{BoolVar, LinearExpr};

fn budget() -> SearchBudget {
    SearchBudget::default().with_time_limit(Duration::from_secs(30))
}

/// `pigeons` pigeons, each in exactly one of `holes` holes, at most one
/// pigeon per hole.
fn pigeonhole(pigeons: usize, holes: usize) -> LinearModel {
    let mut model = LinearModel::new();
    let vars: Vec<Vec<BoolVar>> = (0..pigeons)
        .map(|_| (0..holes).map(|_| model.new_bool_var()).collect())
        .collect();
    for (p, row) in vars.iter().enumerate() {
        model.add_eq("pigeon", format!("pigeon {}", p), LinearExpr::sum(row.clone()), 1);
    }
    for h in 0..holes {
        model.add_le(
            "hole",
            format!("hole {}", h),
            LinearExpr::sum(vars.iter().map(|row| row[h])),
            1,
        );
    }
    model
}

/// Choose exactly `k` of the weighted items, minimizing total weight.
fn choose(weights: &[i64], k: i64) -> (LinearModel, Vec<BoolVar>) {
    let mut model = LinearModel::new();
    let vars: Vec<BoolVar> = weights.iter().map(|_| model.new_bool_var()).collect();
    model.add_eq("choose", "exactly k", LinearExpr::sum(vars.clone()), k);
    let mut objective = LinearExpr::new();
    for (&var, &weight) in vars.iter().zip(weights) {
        objective.add_term(var, weight);
    }
    model.minimize(objective);
    (model, vars)
}

#[test]
fn test_finds_optimum() {
    let (model, vars) = choose(&[5, 3, 8, 1, 4], 2);
    let result = PropagationBackend::new().solve(&model, &budget()).unwrap();

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.objective, Some(4));
    let values = result.values.unwrap();
    assert!(values[vars[1].index()] && values[vars[3].index()]);
    assert!(model.is_satisfied_by(&values));
    assert!(result.statistics.solution_count >= 1);
}

#[test]
fn test_negative_coefficients() {
    let mut model = LinearModel::new();
    let a = model.new_bool_var();
    let b = model.new_bool_var();
    let c = model.new_bool_var();
    // a implies b, b and c exclusive, maximize a + c.
    model.add_le("imply", "a <= b", LinearExpr::new().with_term(a, 1).with_term(b, -1), 0);
    model.add_le("excl", "b + c <= 1", LinearExpr::sum([b, c]), 1);
    model.minimize(LinearExpr::new().with_term(a, -2).with_term(c, -1));

    let result = PropagationBackend::new().solve(&model, &budget()).unwrap();
    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.objective, Some(-2));
    assert_eq!(result.values, Some(vec![true, true, false]));
}

#[test]
fn test_improves_on_penalty_fixed_early() {
    // A first solution with a = 1 forces p = 1; the optimum picks b instead.
    let mut model = LinearModel::new();
    let a = model.new_bool_var();
    let b = model.new_bool_var();
    let p = model.new_bool_var();
    let covers: Vec<BoolVar> = (0..4).map(|_| model.new_bool_var()).collect();
    model.add_eq("cover", "a + b = 1", LinearExpr::sum([a, b]), 1);
    model.add_le("link", "a <= p", LinearExpr::new().with_term(a, 1).with_term(p, -1), 0);
    model.add_eq("cover", "x + y = 1", LinearExpr::sum([covers[0], covers[1]]), 1);
    model.add_eq("cover", "z + w = 1", LinearExpr::sum([covers[2], covers[3]]), 1);
    model.minimize(LinearExpr::sum([p]));

    for seed in 0..16 {
        let result = PropagationBackend::new()
            .solve(&model, &budget().with_worker_count(1).with_random_seed(seed))
            .unwrap();
        assert_eq!(result.status, SolveStatus::Optimal, "seed {}", seed);
        assert_eq!(result.objective, Some(0), "seed {}", seed);
    }
}

#[test]
fn test_proves_infeasibility() {
    let model = pigeonhole(4, 3);
    let result = PropagationBackend::new().solve(&model, &budget()).unwrap();

    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.values.is_none());
    assert!(result.statistics.conflict_count > 0);
}

#[test]
fn test_root_conflict_is_infeasible() {
    let mut model = LinearModel::new();
    let a = model.new_bool_var();
    model.add_ge("cover", "a >= 1", LinearExpr::sum([a]), 1);
    model.add_le("forbid", "a <= 0", LinearExpr::sum([a]), 0);

    let result = PropagationBackend::new().solve(&model, &budget()).unwrap();
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_eq!(result.statistics.node_count, 0);
}

#[test]
fn test_empty_model_is_optimal() {
    let result = PropagationBackend::new()
        .solve(&LinearModel::new(), &budget())
        .unwrap();
    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.objective, Some(0));
    assert_eq!(result.values, Some(Vec::new()));
}

#[test]
fn test_external_flag_stops_before_search() {
    let flag = Arc::new(AtomicBool::new(true));
    let model = pigeonhole(6, 6);
    let result = PropagationBackend::new()
        .solve(&model, &budget().with_terminate(flag))
        .unwrap();

    assert_eq!(result.status, SolveStatus::Unknown);
    assert_eq!(result.statistics.node_count, 0);
}

#[test]
fn test_node_limit_stops_search() {
    let model = pigeonhole(8, 7);
    let result = PropagationBackend::new()
        .with_check_interval(1)
        .solve(&model, &budget().with_node_limit(3))
        .unwrap();

    assert_eq!(result.status, SolveStatus::Unknown);
    assert!(result.statistics.node_count >= 3);
}

#[test]
fn test_objective_limit_accepts_first_good_solution() {
    let (model, _) = choose(&[5, 3, 8, 1, 4], 2);
    let result = PropagationBackend::new()
        .solve(&model, &budget().with_objective_limit(20))
        .unwrap();

    assert!(result.status.has_solution());
    assert!(result.objective.unwrap() <= 20);
}

#[test]
fn test_parallel_workers_agree_on_optimum() {
    let (model, _) = choose(&[9, 2, 7, 4, 6, 3, 8, 5], 3);
    let result = PropagationBackend::new()
        .solve(&model, &budget().with_worker_count(4).with_random_seed(7))
        .unwrap();

    assert_eq!(result.status, SolveStatus::Optimal);
    assert_eq!(result.objective, Some(2 + 3 + 4));
    assert_eq!(result.statistics.worker_count, 4);
}

#[test]
fn test_single_worker_is_deterministic() {
    let model = pigeonhole(5, 5);
    let run = || {
        PropagationBackend::new()
            .solve(&model, &budget().with_random_seed(11))
            .unwrap()
            .values
    };
    assert_eq!(run(), run());
}

#[test]
fn test_rejects_foreign_variable() {
    let mut other = LinearModel::new();
    let foreign: Vec<BoolVar> = (0..3).map(|_| other.new_bool_var()).collect();

    let mut model = LinearModel::new();
    model.new_bool_var();
    model.add_le("bad", "foreign", LinearExpr::sum([foreign[2]]), 1);

    let result = PropagationBackend::new().solve(&model, &budget());
    assert!(matches!(result, Err(DinnerForgeError::Solver(_))));
}
