//! Tests for the schedule encoder.

use dinnerforge_core::{Assignment, PreviousHosting};
use dinnerforge_test::{nine, problem};

use super::*;

fn encode(problem: &DinnerProblem) -> (CandidateSet, ScheduleEncoding) {
    let candidates = CandidateSet::generate(problem).unwrap();
    let encoding = ScheduleEncoder::new().encode(problem, &candidates).unwrap();
    (candidates, encoding)
}

/// Values that realize `assignment` in the encoding, with every penalty
/// set exactly when its pair meets.
fn values_for(
    candidates: &CandidateSet,
    encoding: &ScheduleEncoding,
    assignment: &Assignment,
) -> Vec<bool> {
    let mut values = vec![false; encoding.model().variable_count()];
    for (slot, triplet) in assignment.slots().iter().enumerate() {
        let (id, _) = candidates
            .iter()
            .find(|(_, c)| c.triplet() == *triplet)
            .unwrap();
        values[encoding.used_vars()[id].index()] = true;
        let placement = encoding
            .placements()
            .iter()
            .find(|p| p.candidate == id && p.slot == slot)
            .unwrap();
        values[placement.var.index()] = true;
    }
    for &(pair, var) in encoding.penalties() {
        values[var.index()] = assignment.slots().iter().any(|t| t.contains_pair(pair));
    }
    values
}

#[test]
fn test_model_shape() {
    let (candidates, encoding) = encode(&problem(9));
    let stats = encoding.model().statistics();

    assert_eq!(candidates.len(), 252);
    assert_eq!(stats.variable_count, 252 + 252 * 9);
    assert_eq!(stats.constraints_by_category[category::LINKING], 252);
    assert_eq!(stats.constraints_by_category[category::SLOT_COVERAGE], 9);
    assert_eq!(stats.constraints_by_category[category::PARTICIPATION], 9);
    assert_eq!(stats.constraints_by_category[category::SECTION_COVERAGE], 27);
    assert_eq!(stats.constraints_by_category[category::HOSTING], 9);
    assert_eq!(stats.constraints_by_category[category::PAIRWISE], 36);
    assert!(!stats
        .constraints_by_category
        .contains_key(category::HISTORICAL_PENALTY));
    assert_eq!(stats.objective_term_count, 0);
}

#[test]
fn test_valid_schedule_satisfies_model_and_decodes() {
    let (candidates, encoding) = encode(&problem(9));
    let expected = nine::assignment();
    let values = values_for(&candidates, &encoding, &expected);

    assert!(encoding.model().is_satisfied_by(&values));
    assert_eq!(encoding.model().objective_value(&values), 0);
    assert_eq!(encoding.decode(&values).unwrap(), expected);
}

#[test]
fn test_repeated_pair_breaks_model() {
    let (candidates, encoding) = encode(&problem(9));
    let mut slots = nine::assignment().slots().to_vec();
    // Guests 1 and 4 swap: pairs {0,4} and {1,5} now meet twice.
    slots[0] = Triplet::new(0, 2, 4);
    slots[1] = Triplet::new(5, 1, 3);
    let values = values_for(&candidates, &encoding, &Assignment::new(slots));

    let violation = encoding.model().first_violation(&values).unwrap();
    assert_eq!(violation.category, category::PAIRWISE);
}

#[test]
fn test_previous_hosting_removes_placements() {
    let mut hosting = PreviousHosting::new();
    hosting.insert(0, 0);
    let problem = problem(9).with_previous_hosting(hosting);
    let (candidates, encoding) = encode(&problem);

    let hosted_by_zero = candidates.hosted_by(0).len();
    assert_eq!(encoding.placements().len(), 252 * 9 - hosted_by_zero * 3);
    for placement in encoding.placements() {
        let triplet = candidates.get(placement.candidate).unwrap().triplet();
        assert!(!(triplet.is_host(0) && placement.slot < 3));
    }
}

#[test]
fn test_penalty_counts_reused_pairs() {
    let history = nine::history_of(&[[0, 1, 2], [0, 5, 7]]);
    let problem = problem(9).with_historical_pairs(history.clone());
    let (candidates, encoding) = encode(&problem);

    assert_eq!(encoding.penalties().len(), 6);
    let assignment = nine::assignment();
    let values = values_for(&candidates, &encoding, &assignment);

    assert!(encoding.model().is_satisfied_by(&values));
    assert_eq!(encoding.model().objective_value(&values), 3);
    assert_eq!(assignment.historical_reuse(&history), 3);

    // Leaving a penalty off while its pair meets breaks the model.
    let mut cheating = values.clone();
    let (_, var) = encoding.penalties()[0];
    cheating[var.index()] = false;
    assert!(!encoding.model().is_satisfied_by(&cheating));
}

#[test]
fn test_decode_rejects_bad_values() {
    let (candidates, encoding) = encode(&problem(9));
    let values = values_for(&candidates, &encoding, &nine::assignment());

    assert!(matches!(
        encoding.decode(&values[1..]),
        Err(DinnerForgeError::Solver(_))
    ));

    let mut empty_slot = values.clone();
    for placement in encoding.placements().iter().filter(|p| p.slot == 4) {
        empty_slot[placement.var.index()] = false;
    }
    assert!(matches!(
        encoding.decode(&empty_slot),
        Err(DinnerForgeError::Solver(_))
    ));

    let mut double = values.clone();
    let extra = encoding
        .placements()
        .iter()
        .find(|p| p.slot == 4 && !values[p.var.index()])
        .unwrap();
    double[extra.var.index()] = true;
    assert!(matches!(
        encoding.decode(&double),
        Err(DinnerForgeError::Solver(_))
    ));
}

#[test]
fn test_rejects_mismatched_candidates() {
    let candidates = CandidateSet::generate(&problem(9)).unwrap();
    let result = ScheduleEncoder::new().encode(&problem(12), &candidates);
    assert!(matches!(result, Err(DinnerForgeError::DomainModel(_))));
}

#[test]
fn test_rejects_unknown_historical_participant() {
    let mut history = dinnerforge_core::HistoricalPairs::new();
    history.insert(Pair::new(2, 9).unwrap());
    let problem = problem(9).with_historical_pairs(history);
    let candidates = CandidateSet::generate(&problem).unwrap();

    let result = ScheduleEncoder::new().encode(&problem, &candidates);
    assert!(matches!(result, Err(DinnerForgeError::DomainModel(_))));
}
