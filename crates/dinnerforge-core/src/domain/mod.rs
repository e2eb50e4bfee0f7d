//! Domain model for dinner scheduling
//!
//! These types describe one occurrence of the dinner event:
//! - `Roster`: the participants, indexed densely by read order
//! - `SectionLayout`: how the N slots split into three sections
//! - `Triplet`: one host with two guests
//! - `PreviousHosting` / `HistoricalPairs`: what happened last time
//! - `Assignment` / `Schedule`: index-level and address-level solutions

mod assignment;
mod history;
mod layout;
mod problem;
mod roster;
mod triplet;

#[cfg(test)]
mod tests;

pub use assignment::{Assignment, Schedule, ScheduleRecord};
pub use history::{HistoricalPairs, PreviousHosting};
pub use layout::{SectionLayout, SECTION_COUNT};
pub use problem::DinnerProblem;
pub use roster::Roster;
pub use triplet::{Pair, Triplet};

/// Dense participant index in `[0, N)`.
pub type ParticipantIndex = usize;
