//! Error types for DinnerForge

use thiserror::Error;

/// Main error type for DinnerForge operations.
///
/// Infeasibility and verification failures are not errors: the solver
/// reports the former as an outcome value and the verifier reports the
/// latter as violations.
#[derive(Debug, Error)]
pub enum DinnerForgeError {
    /// Problem or solver configuration that cannot be solved as stated
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed domain data (duplicate addresses, bad indices, ...)
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Unexpected failure inside the constraint-solving backend
    #[error("Solver error: {0}")]
    Solver(String),
}

/// Result type alias for DinnerForge operations
pub type Result<T> = std::result::Result<T, DinnerForgeError>;
