//! Solving and verifying through data files.

use std::fs;
use std::path::Path;

use dinnerforge::io::{self, DataSet};
use dinnerforge::prelude::*;
use dinnerforge::Violation;
use tempfile::TempDir;

fn write_data(dir: &Path) {
    let addresses: String = std::iter::once("Address".to_string())
        .chain((0..9).map(|i| format!("House {}", i)))
        .map(|line| line + "\n")
        .collect();
    fs::write(dir.join(io::ADDRESS_LIST), addresses).unwrap();
    fs::write(
        dir.join(io::LAST_YEAR_COURSES),
        "Address,Course\nHouse 0,1\nHouse 1,2\nHouse 2,3\nMoved Away,1\n",
    )
    .unwrap();
    fs::write(
        dir.join(io::LAST_YEAR_ASSIGNMENTS),
        "Host,Guest1,Guest2\nHouse 0,House 1,House 2\nHouse 3,House 4,Moved Away\n",
    )
    .unwrap();
}

fn config() -> SolverConfig {
    SolverConfig::new()
        .with_environment_mode(EnvironmentMode::Reproducible)
        .with_termination_seconds(60)
}

#[test]
fn test_solve_write_and_verify() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path());

    let data = DataSet::load(dir.path()).unwrap();
    assert_eq!(data.roster.len(), 9);
    assert_eq!(data.previous_hosting.len(), 3);
    assert_eq!(data.historical_pairs.len(), 4);

    let problem = data.problem();
    let solved = ScheduleSolver::new(config())
        .solve(&problem)
        .unwrap()
        .into_solved()
        .unwrap();
    assert_eq!(solved.status, SolveStatus::Optimal);
    assert_eq!(solved.objective, 0);

    let path = dir.path().join(io::SOLUTION);
    io::write_schedule(&path, &solved.schedule).unwrap();
    let schedule = io::read_schedule(&path).unwrap();

    let report = dinnerforge::verify(&problem, &schedule);
    assert!(report.is_fully_satisfied(), "{}", report);
}

#[test]
fn test_edited_solution_fails_verification() {
    let dir = TempDir::new().unwrap();
    write_data(dir.path());
    let problem = DataSet::load(dir.path()).unwrap().problem();

    let solved = ScheduleSolver::new(config())
        .solve(&problem)
        .unwrap()
        .into_solved()
        .unwrap();

    // Drop the last row.
    let path = dir.path().join(io::SOLUTION);
    io::write_schedule(&path, &solved.schedule).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let truncated: Vec<&str> = text.lines().take(9).collect();
    fs::write(&path, truncated.join("\n")).unwrap();

    let report = dinnerforge::verify(&problem, &io::read_schedule(&path).unwrap());
    assert!(!report.all_valid());
    assert!(report.violations().any(|v| matches!(
        v,
        Violation::WrongLength {
            expected: 9,
            actual: 8
        }
    )));
}
