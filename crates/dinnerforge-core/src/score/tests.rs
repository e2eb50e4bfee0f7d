//! Tests for HardSoftScore.

use super::*;

#[test]
fn test_hard_dominates_soft() {
    let infeasible = HardSoftScore::of(-1, 0);
    let feasible_with_reuse = HardSoftScore::of(0, -10);

    assert!(feasible_with_reuse > infeasible);
    assert!(!infeasible.is_feasible());
    assert!(feasible_with_reuse.is_feasible());
}

#[test]
fn test_soft_breaks_ties() {
    assert!(HardSoftScore::of(0, -1) > HardSoftScore::of(0, -2));
    assert_eq!(HardSoftScore::of(-2, -3), HardSoftScore::of(-2, -3));
}

#[test]
fn test_from_penalties() {
    let score = HardSoftScore::from_penalties(3, 2);
    assert_eq!(score.hard(), -3);
    assert_eq!(score.soft(), -2);
}

#[test]
fn test_arithmetic() {
    let a = HardSoftScore::of(-1, -2);
    let b = HardSoftScore::of_soft(-3);

    assert_eq!(a + b, HardSoftScore::of(-1, -5));
    assert_eq!(a - b, HardSoftScore::of(-1, 1));
    assert_eq!(-a, HardSoftScore::of(1, 2));
    assert_eq!(HardSoftScore::of_hard(-4).soft(), 0);
}

#[test]
fn test_display_and_parse() {
    let score = HardSoftScore::of(-2, -7);
    assert_eq!(score.to_string(), "-2hard/-7soft");
    assert_eq!("-2hard/-7soft".parse::<HardSoftScore>(), Ok(score));
    assert_eq!(" 0hard / 0soft ".parse::<HardSoftScore>(), Ok(HardSoftScore::ZERO));
}

#[test]
fn test_parse_errors() {
    assert!("0hard".parse::<HardSoftScore>().is_err());
    assert!("0/0".parse::<HardSoftScore>().is_err());
    assert!("xhard/0soft".parse::<HardSoftScore>().is_err());

    let err = "0hard/1medium".parse::<HardSoftScore>().unwrap_err();
    assert_eq!(err.input, "0hard/1medium");
}
