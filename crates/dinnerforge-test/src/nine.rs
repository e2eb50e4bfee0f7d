//! A valid schedule for nine participants.
//!
//! Participants are the points of the 3x3 grid (`p = 3 * row + col`).
//! Section 1 uses the rows, section 2 the columns, section 3 one family of
//! diagonals. The other diagonal family never meets.

use dinnerforge_core::{
    Assignment, HistoricalPairs, Pair, Roster, Schedule, SectionLayout, Triplet,
};

/// `(host, guest, guest)` for each slot, in slot order.
pub const SLOTS: [[usize; 3]; 9] = [
    [0, 1, 2],
    [5, 3, 4],
    [7, 6, 8],
    [3, 0, 6],
    [1, 4, 7],
    [8, 2, 5],
    [4, 0, 8],
    [6, 1, 5],
    [2, 3, 7],
];

/// Triplets of the unused diagonal family.
pub const UNUSED_LINES: [[usize; 3]; 3] = [[0, 5, 7], [1, 3, 8], [2, 4, 6]];

pub fn assignment() -> Assignment {
    Assignment::new(SLOTS.iter().map(|&[h, a, b]| Triplet::new(h, a, b)).collect())
}

/// The schedule resolved against `roster`, which must have nine members.
pub fn schedule(roster: &Roster) -> Schedule {
    let layout = SectionLayout::for_participants(9).expect("nine is a multiple of three");
    assignment()
        .to_schedule(roster, &layout)
        .expect("fixture indices are on a roster of nine")
}

/// All twelve lines of the grid; every pair of participants shares
/// exactly one of them.
pub fn all_lines() -> Vec<[usize; 3]> {
    SLOTS.iter().chain(UNUSED_LINES.iter()).copied().collect()
}

/// Historical pairs from a set of index triplets.
pub fn history_of(lines: &[[usize; 3]]) -> HistoricalPairs {
    lines
        .iter()
        .flat_map(|&[a, b, c]| [Pair::new(a, b), Pair::new(a, c), Pair::new(b, c)])
        .flatten()
        .collect()
}
