//! Shared test fixtures for DinnerForge crates.
//!
//! This crate provides rosters and known-valid schedules for testing.
//! It depends only on `dinnerforge-core`.
//!
//! - [`roster`] - generated address lists and problems
//! - [`nine`] - a hand-built valid schedule for nine participants
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! dinnerforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use dinnerforge_test::{nine, roster};
//!
//! let roster = roster::roster(9);
//! let schedule = nine::schedule(&roster);
//! assert_eq!(schedule.len(), 9);
//! ```

pub mod nine;
pub mod roster;

pub use roster::{addresses, problem, roster};
