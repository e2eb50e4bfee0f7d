//! DinnerForge - Running dinner scheduling in Rust
//!
//! Assigns every participant of a running dinner to three triplets (host
//! plus two guests), one per course, so that nobody meets anyone twice and
//! as few of last year's pairs as possible meet again.
//!
//! # Example
//!
//! ```rust
//! use dinnerforge::prelude::*;
//!
//! let roster = Roster::new((0..9).map(|i| format!("House {}", i))).unwrap();
//! let problem = DinnerProblem::new(roster);
//! let config = SolverConfig::new()
//!     .with_environment_mode(EnvironmentMode::Reproducible)
//!     .with_termination_seconds(60);
//!
//! let solved = ScheduleSolver::new(config)
//!     .solve(&problem)
//!     .unwrap()
//!     .into_solved()
//!     .unwrap();
//!
//! let report = verify(&problem, &solved.schedule);
//! assert!(report.all_valid());
//! assert_eq!(solved.score, HardSoftScore::ZERO);
//! ```

pub mod io;

// Domain and score types
pub use dinnerforge_core::{
    Assignment, Candidate, CandidateId, CandidateSet, DinnerForgeError, DinnerProblem,
    HardSoftScore, HistoricalPairs, Pair, ParticipantIndex, PreviousHosting, Result, Roster,
    Schedule, ScheduleRecord, SectionLayout, Triplet, SECTION_COUNT,
};

// Configuration
pub use dinnerforge_config::{
    ConfigError, EnvironmentMode, SolverConfig, TerminationConfig, WorkerCount,
};

// Solving
pub use dinnerforge_solver::{
    NoSolutionReason, PropagationBackend, ScheduleSolver, SearchStatistics, SolveOutcome,
    SolveStatus, SolvedSchedule, SolverBackend,
};

// Verification
pub use dinnerforge_verify::{
    Category, CheckResult, ScheduleVerifier, VerificationReport, Violation,
};

// Console output
pub use dinnerforge_console as console;

/// Verifies a schedule against the problem it was made for.
pub fn verify(problem: &DinnerProblem, schedule: &Schedule) -> VerificationReport {
    ScheduleVerifier::new(
        problem.roster(),
        problem.previous_hosting(),
        problem.historical_pairs(),
    )
    .verify(schedule)
}

pub mod prelude {
    pub use super::verify;
    pub use super::{
        DinnerProblem, HardSoftScore, HistoricalPairs, PreviousHosting, Roster, Schedule,
    };
    pub use super::{EnvironmentMode, SolverConfig};
    pub use super::{ScheduleSolver, SolveOutcome, SolveStatus};
    pub use super::{ScheduleVerifier, VerificationReport};
}
