//! Generated rosters.

use dinnerforge_core::{DinnerProblem, Roster};

/// `n` distinct addresses: `"Address 0"`, `"Address 1"`, ...
pub fn addresses(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Address {}", i)).collect()
}

/// Roster of [`addresses`]`(n)`; participant `i` is `"Address i"`.
pub fn roster(n: usize) -> Roster {
    Roster::new(addresses(n)).expect("generated addresses are unique")
}

/// Problem over [`roster`]`(n)` with no history.
pub fn problem(n: usize) -> DinnerProblem {
    DinnerProblem::new(roster(n))
}
