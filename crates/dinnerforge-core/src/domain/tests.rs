//! Tests for the domain model.

use super::*;
use crate::error::DinnerForgeError;

fn roster(n: usize) -> Roster {
    Roster::new((0..n).map(|i| format!("Street {}", i))).unwrap()
}

#[test]
fn test_roster_indexes_by_read_order() {
    let roster = Roster::new(["  b ", "a", "c"]).unwrap();
    assert_eq!(roster.index_of("b"), Some(0));
    assert_eq!(roster.index_of(" a "), Some(1));
    assert_eq!(roster.address(2), Some("c"));
    assert_eq!(roster.address(3), None);
    assert!(!roster.contains("d"));
}

#[test]
fn test_roster_rejects_blank_and_duplicate() {
    assert!(matches!(
        Roster::new(["a", " "]),
        Err(DinnerForgeError::DomainModel(_))
    ));
    assert!(matches!(
        Roster::new(["a", "b", " a"]),
        Err(DinnerForgeError::DomainModel(_))
    ));
}

#[test]
fn test_layout_requires_multiple_of_three() {
    assert!(matches!(
        SectionLayout::for_participants(0),
        Err(DinnerForgeError::Config(_))
    ));
    assert!(matches!(
        SectionLayout::for_participants(10),
        Err(DinnerForgeError::Config(_))
    ));
    assert!(SectionLayout::with_section_size(9, 4).is_err());

    let layout = SectionLayout::with_section_size(12, 4).unwrap();
    assert_eq!(layout.slot_count(), 12);
    assert_eq!(layout.section_of(3), 0);
    assert_eq!(layout.section_of(4), 1);
    assert_eq!(layout.display_section(11), 3);
    assert_eq!(layout.slots(2), 8..12);
}

#[test]
fn test_pair_is_canonical() {
    assert_eq!(Pair::new(5, 2), Pair::new(2, 5));
    assert_eq!(Pair::new(3, 3), None);

    let pair = Pair::new(7, 1).unwrap();
    assert_eq!((pair.low(), pair.high()), (1, 7));
    assert!(pair.contains(7));
}

#[test]
fn test_triplet_canonical_guests_and_pairs() {
    let t = Triplet::new(4, 9, 2);
    assert_eq!(t.guests(), [2, 9]);
    assert_eq!(t, Triplet::new(4, 2, 9));
    assert_ne!(t, Triplet::new(2, 4, 9));
    assert!(t.is_host(4));
    assert!(!t.is_host(2));

    let pairs: Vec<Pair> = t.pairs().collect();
    assert_eq!(pairs.len(), 3);
    assert!(pairs.contains(&Pair::new(2, 9).unwrap()));
    assert!(t.contains_pair(Pair::new(4, 9).unwrap()));
    assert!(!t.contains_pair(Pair::new(4, 5).unwrap()));
}

#[test]
fn test_triplet_try_new_rejects_repeats() {
    assert!(Triplet::try_new(1, 1, 2).is_err());
    assert!(Triplet::try_new(1, 2, 2).is_err());
    assert!(Triplet::try_new(1, 2, 3).is_ok());
}

#[test]
fn test_previous_hosting_records() {
    let roster = roster(3);
    let hosting = PreviousHosting::from_records(
        &roster,
        [("Street 0", 2), ("Elsewhere", 1), ("Street 2", 3)],
    )
    .unwrap();

    assert_eq!(hosting.len(), 2);
    assert_eq!(hosting.section_of(0), Some(1));
    assert!(hosting.forbids(2, 2));
    assert!(!hosting.forbids(1, 0));
}

#[test]
fn test_previous_hosting_rejects_out_of_range() {
    let roster = roster(3);
    assert!(PreviousHosting::from_records(&roster, [("Street 0", 0)]).is_err());
    assert!(PreviousHosting::from_records(&roster, [("Street 2", 4)]).is_err());
}

#[test]
fn test_previous_hosting_ignores_unknown_address_in_any_section() {
    let roster = roster(3);
    let hosting =
        PreviousHosting::from_records(&roster, [("Nowhere", 4), ("Street 1", 2), ("Gone", 0)])
            .unwrap();
    assert_eq!(hosting.len(), 1);
    assert_eq!(hosting.section_of(1), Some(1));
}

#[test]
fn test_historical_pairs_skip_unknown_members() {
    let roster = roster(4);
    let history = HistoricalPairs::from_triplets(
        &roster,
        [
            ["Street 0", "Street 1", "Street 2"],
            ["Street 2", "Street 1", "Elsewhere"],
            ["Street 3", "Street 3", "Street 0"],
        ],
    );

    let pairs: Vec<Pair> = history.iter().collect();
    assert_eq!(
        pairs,
        vec![
            Pair::new(0, 1).unwrap(),
            Pair::new(0, 2).unwrap(),
            Pair::new(0, 3).unwrap(),
            Pair::new(1, 2).unwrap(),
        ]
    );
}

#[test]
fn test_problem_layout() {
    assert!(DinnerProblem::new(roster(9)).layout().is_ok());
    assert!(DinnerProblem::new(roster(8)).layout().is_err());
}

#[test]
fn test_assignment_to_schedule() {
    let roster = roster(3);
    let layout = SectionLayout::for_participants(3).unwrap();
    let assignment = Assignment::new(vec![
        Triplet::new(0, 1, 2),
        Triplet::new(1, 0, 2),
        Triplet::new(2, 0, 1),
    ]);

    let schedule = assignment.to_schedule(&roster, &layout).unwrap();
    assert_eq!(schedule.len(), 3);
    let last = &schedule.records()[2];
    assert_eq!(last.slot, 2);
    assert_eq!(last.section, 3);
    assert_eq!(last.members(), ["Street 2", "Street 0", "Street 1"]);
}

#[test]
fn test_assignment_to_schedule_rejects_bad_index() {
    let roster = roster(3);
    let layout = SectionLayout::for_participants(3).unwrap();
    let assignment = Assignment::new(vec![
        Triplet::new(0, 1, 2),
        Triplet::new(1, 0, 2),
        Triplet::new(7, 0, 1),
    ]);
    assert!(assignment.to_schedule(&roster, &layout).is_err());
}

#[test]
fn test_historical_reuse_counts_distinct_pairs() {
    let history: HistoricalPairs = [Pair::new(0, 1).unwrap(), Pair::new(3, 4).unwrap()]
        .into_iter()
        .collect();
    let assignment = Assignment::new(vec![Triplet::new(0, 1, 2), Triplet::new(1, 0, 5)]);
    assert_eq!(assignment.historical_reuse(&history), 1);
}

#[test]
fn test_schedule_positional_sections() {
    let schedule = Schedule::from_triplets([
        ["a", "b", "c"],
        ["d", "e", "f"],
        ["g", "h", "i"],
        ["j", "k", "l"],
    ]);
    let sections: Vec<usize> = schedule.iter().map(|r| r.section).collect();
    assert_eq!(sections, vec![1, 1, 2, 2]);
    assert_eq!(Schedule::positional_section_size(0), 1);
    assert_eq!(Schedule::positional_section_size(9), 3);
}
