//! Composite termination (OR).
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use super::{SearchProgress, Termination};

/// Combines multiple terminations with OR logic.
///
/// Wraps a tuple of terminations. Terminates when ANY child terminates.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use dinnerforge_solver::termination::{
///     NodeCountTermination, OrTermination, SearchProgress, Termination, TimeTermination,
/// };
///
/// // Terminate after 30 seconds OR 1000 nodes
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1000),
/// ));
/// let progress = SearchProgress {
///     elapsed: Duration::from_secs(1),
///     node_count: 1000,
///     best_objective: None,
/// };
/// assert!(termination.is_terminated(&progress));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, progress: &SearchProgress) -> bool {
                $((self.0).$idx.is_terminated(progress))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
