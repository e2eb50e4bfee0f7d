//! Configuration system for DinnerForge.
//!
//! Load solver configuration from TOML or YAML files to control the search
//! budget, parallelism and reproducibility without code changes.
//!
//! # Examples
//!
//! ```
//! use dinnerforge_config::{SolverConfig, WorkerCount};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     environment_mode = "reproducible"
//!     worker_count = { count = 4 }
//!
//!     [termination]
//!     minutes_spent_limit = 2
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(150)));
//! assert_eq!(config.worker_count, WorkerCount::Count(4));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use dinnerforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("dinnerforge.toml").unwrap_or_default();
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Time limit applied when no termination is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(3600);

/// Upper bound for `WorkerCount::Auto`.
pub const MAX_AUTO_WORKERS: usize = 8;

/// Seed used in reproducible mode when none is configured.
pub const DEFAULT_RANDOM_SEED: u64 = 0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for worker tie-breaking.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Number of parallel search workers.
    #[serde(default)]
    pub worker_count: WorkerCount,

    /// Expected slots per section; checked against the roster size.
    #[serde(default)]
    pub section_size: Option<usize>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing YAML for `.yaml`/`.yml`
    /// extensions and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or holds
    /// invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values no solve could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_count == WorkerCount::Count(0) {
            return Err(ConfigError::Invalid(
                "worker_count must be at least 1".to_string(),
            ));
        }
        if self.section_size == Some(0) {
            return Err(ConfigError::Invalid(
                "section_size must be at least 1".to_string(),
            ));
        }
        if let Some(termination) = &self.termination {
            if termination.node_count_limit == Some(0) {
                return Err(ConfigError::Invalid(
                    "node_count_limit must be at least 1".to_string(),
                ));
            }
            if termination.best_objective_limit.is_some_and(|l| l < 0) {
                return Err(ConfigError::Invalid(
                    "best_objective_limit must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            minutes_spent_limit: None,
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the node count limit.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Stops as soon as a solution with this objective or better is found.
    pub fn with_best_objective_limit(mut self, objective: i64) -> Self {
        self.termination = Some(TerminationConfig {
            best_objective_limit: Some(objective),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets a fixed worker count.
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = WorkerCount::Count(count);
        self
    }

    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    pub fn with_section_size(mut self, section_size: usize) -> Self {
        self.section_size = Some(section_size);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinnerforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::new().with_termination_seconds(30);
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    /// assert_eq!(SolverConfig::new().time_limit(), None);
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Time limit to apply, falling back to [`DEFAULT_TIME_LIMIT`].
    pub fn effective_time_limit(&self) -> Duration {
        self.time_limit().unwrap_or(DEFAULT_TIME_LIMIT)
    }

    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }

    pub fn best_objective_limit(&self) -> Option<i64> {
        self.termination.as_ref().and_then(|t| t.best_objective_limit)
    }

    pub fn is_reproducible(&self) -> bool {
        self.environment_mode == EnvironmentMode::Reproducible
    }

    /// Worker count to run with, given the machine's available parallelism.
    ///
    /// Reproducible mode always runs one worker.
    pub fn resolve_worker_count(&self, available: usize) -> usize {
        if self.is_reproducible() {
            return 1;
        }
        match self.worker_count {
            WorkerCount::Auto => available.clamp(1, MAX_AUTO_WORKERS),
            WorkerCount::Count(n) => n.max(1),
        }
    }

    /// Seed to run with: the configured one, a fixed default in
    /// reproducible mode, otherwise `None` (caller picks a fresh seed).
    pub fn resolve_random_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::Reproducible) => Some(DEFAULT_RANDOM_SEED),
            (None, EnvironmentMode::NonReproducible) => None,
        }
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Parallel workers race; ties among equal optima may resolve differently.
    #[default]
    NonReproducible,

    /// Single worker and fixed seed: identical input gives identical output.
    Reproducible,
}

/// Worker count configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerCount {
    /// Available parallelism, capped at [`MAX_AUTO_WORKERS`].
    #[default]
    Auto,

    /// Specific number of workers.
    Count(usize),
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum number of search nodes, summed across all workers.
    pub node_count_limit: Option<u64>,

    /// Stop once the objective reaches this value or lower.
    pub best_objective_limit: Option<i64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds = self
            .minutes_spent_limit
            .unwrap_or(0)
            .saturating_mul(60)
            .saturating_add(self.seconds_spent_limit.unwrap_or(0));
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}
