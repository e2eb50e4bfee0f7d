//! DinnerForge Solver
//!
//! This crate turns a [`DinnerProblem`](dinnerforge_core::DinnerProblem)
//! into a schedule:
//! - `model`: boolean linear model and the pluggable backend trait
//! - `encoder`: candidate set to linear model, and back to an assignment
//! - `engine`: propagation-based branch-and-bound backend
//! - `termination`: stop conditions for the search
//! - `statistics`: search counters and objective history
//! - `solver`: the driver tying everything together

pub mod encoder;
pub mod engine;
pub mod model;
pub mod solver;
pub mod statistics;
pub mod termination;

pub use encoder::{ScheduleEncoder, ScheduleEncoding};
pub use engine::PropagationBackend;
pub use model::{
    BackendResult, BoolVar, LinearConstraint, LinearExpr, LinearModel, ModelStatistics, Relation,
    SearchBudget, SolveStatus, SolverBackend,
};
pub use solver::{NoSolutionReason, ScheduleSolver, SolveOutcome, SolvedSchedule};
pub use statistics::{ObjectiveImprovement, SearchStatistics, StatisticsCollector};
pub use termination::{
    BestObjectiveTermination, ExternalTermination, NodeCountTermination, OrTermination,
    SearchProgress, Termination, TimeTermination,
};
