//! DinnerForge Core - Domain model and candidate space for dinner scheduling
//!
//! This crate provides the fundamental building blocks for DinnerForge:
//! - Domain types: roster, section layout, triplets, history, assignments
//! - Score type for reporting solution quality
//! - Candidate generation for the triplet-to-slot search space
//!
//! Everything here is plain data: no file system access, no global state.

pub mod candidate;
pub mod domain;
pub mod error;
pub mod score;

pub use candidate::{Candidate, CandidateId, CandidateSet};
pub use domain::{
    Assignment, DinnerProblem, HistoricalPairs, Pair, ParticipantIndex, PreviousHosting, Roster,
    Schedule, ScheduleRecord, SectionLayout, Triplet, SECTION_COUNT,
};
pub use error::{DinnerForgeError, Result};
pub use score::{HardSoftScore, ScoreParseError};
