//! DinnerForge Verify - Independent re-checking of schedules
//!
//! The verifier works on the address-level [`Schedule`](dinnerforge_core::Schedule)
//! only. It shares no state with the solver and accepts malformed input:
//! every problem becomes a [`Violation`] in the report.
//!
//! # Example
//!
//! ```
//! use dinnerforge_core::{HistoricalPairs, PreviousHosting};
//! use dinnerforge_test::{nine, roster};
//! use dinnerforge_verify::ScheduleVerifier;
//!
//! let roster = roster(9);
//! let previous = PreviousHosting::new();
//! let history = HistoricalPairs::new();
//!
//! let report = ScheduleVerifier::new(&roster, &previous, &history)
//!     .verify(&nine::schedule(&roster));
//! assert!(report.all_valid());
//! assert_eq!(report.historical_reuse_count(), 0);
//! ```

mod report;
mod verifier;
mod violation;


pub use report::{CheckResult, VerificationReport};
pub use verifier::ScheduleVerifier;
pub use violation::{Category, Violation};
