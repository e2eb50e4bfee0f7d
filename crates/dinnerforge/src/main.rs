//! DinnerForge command line.
//!
//! `dinnerforge solve` builds a schedule from a data directory and writes
//! `assignment_solution.csv`; `dinnerforge verify` re-checks a solution
//! file and exits with status 1 when it is invalid.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use dinnerforge::io::{self, DataSet};
use dinnerforge::{
    console, verify, CandidateSet, EnvironmentMode, NoSolutionReason, ScheduleSolver,
    SolveOutcome, SolverConfig,
};

#[derive(Parser)]
#[command(name = "dinnerforge")]
#[command(version, about = "Running dinner scheduler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a schedule for the addresses in a data directory.
    Solve {
        /// Directory with address_list.csv and last year's files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Solution file (default: <data-dir>/assignment_solution.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Solver configuration (TOML or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Time limit in seconds
        #[arg(long)]
        time_limit: Option<u64>,
        /// Number of search workers
        #[arg(long)]
        workers: Option<usize>,
        /// Random seed for tie-breaking
        #[arg(long)]
        seed: Option<u64>,
        /// Single worker and fixed seed
        #[arg(long)]
        reproducible: bool,
    },

    /// Check a solution file against the data directory.
    Verify {
        /// Directory with address_list.csv and last year's files
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        /// Solution file (default: <data-dir>/assignment_solution.csv)
        #[arg(short, long)]
        solution: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    console::init();

    match cli.command {
        Commands::Solve {
            data_dir,
            output,
            config,
            time_limit,
            workers,
            seed,
            reproducible,
        } => {
            let mut config = match config {
                Some(path) => SolverConfig::load(&path)
                    .with_context(|| format!("loading configuration {}", path.display()))?,
                None => SolverConfig::default(),
            };
            if let Some(seconds) = time_limit {
                config = config.with_termination_seconds(seconds);
            }
            if let Some(workers) = workers {
                config = config.with_worker_count(workers);
            }
            if let Some(seed) = seed {
                config = config.with_random_seed(seed);
            }
            if reproducible {
                config = config.with_environment_mode(EnvironmentMode::Reproducible);
            }
            let output = output.unwrap_or_else(|| data_dir.join(io::SOLUTION));
            solve(data_dir, output, config)
        }
        Commands::Verify { data_dir, solution } => {
            let solution = solution.unwrap_or_else(|| data_dir.join(io::SOLUTION));
            verify_file(data_dir, solution)
        }
    }
}

fn solve(data_dir: PathBuf, output: PathBuf, config: SolverConfig) -> Result<ExitCode> {
    let data = DataSet::load(&data_dir)
        .with_context(|| format!("loading data from {}", data_dir.display()))?;
    let problem = data.problem();

    println!(
        "Problem size: {} addresses, {} candidate triplets",
        problem.participant_count(),
        CandidateSet::expected_len(problem.participant_count())
    );

    let outcome = ScheduleSolver::new(config)
        .solve(&problem)
        .context("solving")?;

    let solved = match outcome {
        SolveOutcome::Solved(solved) => solved,
        SolveOutcome::NoSolutionFound { reason, .. } => {
            match reason {
                NoSolutionReason::Infeasible => {
                    eprintln!("No schedule exists for these addresses and last year's hosts.")
                }
                NoSolutionReason::BudgetExhausted => {
                    eprintln!("No schedule found within the time limit.")
                }
            }
            return Ok(ExitCode::from(2));
        }
    };

    println!(
        "\nSolution found with objective value: {} ({})",
        solved.objective, solved.status
    );

    io::write_schedule(&output, &solved.schedule)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(event = "solution_written", path = %output.display());
    println!("Solution has been written to {}\n", output.display());

    console::print_schedule(&solved.schedule);

    let report = verify(&problem, &solved.schedule);
    if !report.all_valid() {
        console::print_report(&report);
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn verify_file(data_dir: PathBuf, solution: PathBuf) -> Result<ExitCode> {
    let data = DataSet::load(&data_dir)
        .with_context(|| format!("loading data from {}", data_dir.display()))?;
    let schedule = io::read_schedule(&solution)
        .with_context(|| format!("reading solution {}", solution.display()))?;

    let report = verify(&data.problem(), &schedule);
    console::print_report(&report);

    if report.all_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
