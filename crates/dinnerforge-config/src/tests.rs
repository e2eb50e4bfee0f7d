//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        environment_mode = "reproducible"
        random_seed = 42
        worker_count = "auto"
        section_size = 4

        [termination]
        seconds_spent_limit = 30
        node_count_limit = 100000
        best_objective_limit = 0
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::Reproducible);
    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.worker_count, WorkerCount::Auto);
    assert_eq!(config.section_size, Some(4));
    assert_eq!(config.node_count_limit(), Some(100_000));
    assert_eq!(config.best_objective_limit(), Some(0));
    assert_eq!(config.termination.unwrap().seconds_spent_limit, Some(30));
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        environment_mode: non_reproducible
        worker_count:
          count: 3
        termination:
          minutes_spent_limit: 1
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.environment_mode, EnvironmentMode::NonReproducible);
    assert_eq!(config.worker_count, WorkerCount::Count(3));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert_eq!(config, SolverConfig::default());
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.effective_time_limit(), DEFAULT_TIME_LIMIT);
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_random_seed(123)
        .with_termination_seconds(60)
        .with_node_count_limit(500)
        .with_worker_count(2)
        .with_section_size(3);

    assert_eq!(config.random_seed, Some(123));
    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.node_count_limit(), Some(500));
    assert_eq!(config.worker_count, WorkerCount::Count(2));
    assert_eq!(config.section_size, Some(3));
}

#[test]
fn test_termination_seconds_replaces_minutes() {
    let config = SolverConfig::from_toml_str(
        r#"
        [termination]
        minutes_spent_limit = 5
        node_count_limit = 10
        "#,
    )
    .unwrap()
    .with_termination_seconds(7);

    assert_eq!(config.time_limit(), Some(Duration::from_secs(7)));
    assert_eq!(config.node_count_limit(), Some(10));
}

#[test]
fn test_huge_time_limit_saturates() {
    let termination = TerminationConfig {
        minutes_spent_limit: Some(u64::MAX),
        seconds_spent_limit: Some(30),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(u64::MAX)));

    let termination = TerminationConfig {
        minutes_spent_limit: Some(2),
        seconds_spent_limit: Some(30),
        ..Default::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_secs(150)));
}

#[test]
fn test_invalid_values() {
    for toml in [
        "worker_count = { count = 0 }",
        "section_size = 0",
        "[termination]\nnode_count_limit = 0",
        "[termination]\nbest_objective_limit = -1",
    ] {
        assert!(
            matches!(SolverConfig::from_toml_str(toml), Err(ConfigError::Invalid(_))),
            "accepted: {}",
            toml
        );
    }
    assert!(matches!(
        SolverConfig::from_toml_str("worker_count = 7"),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_resolve_worker_count() {
    let auto = SolverConfig::new();
    assert_eq!(auto.resolve_worker_count(4), 4);
    assert_eq!(auto.resolve_worker_count(64), MAX_AUTO_WORKERS);
    assert_eq!(auto.resolve_worker_count(0), 1);

    let fixed = SolverConfig::new().with_worker_count(12);
    assert_eq!(fixed.resolve_worker_count(2), 12);

    let reproducible = fixed.with_environment_mode(EnvironmentMode::Reproducible);
    assert_eq!(reproducible.resolve_worker_count(16), 1);
}

#[test]
fn test_resolve_random_seed() {
    assert_eq!(SolverConfig::new().resolve_random_seed(), None);
    assert_eq!(
        SolverConfig::new()
            .with_environment_mode(EnvironmentMode::Reproducible)
            .resolve_random_seed(),
        Some(DEFAULT_RANDOM_SEED)
    );
    assert_eq!(
        SolverConfig::new().with_random_seed(9).resolve_random_seed(),
        Some(9)
    );
}

#[test]
fn test_load_missing_file() {
    let result = SolverConfig::load("/nonexistent/dinnerforge.toml");
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
