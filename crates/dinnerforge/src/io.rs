//! Reading event data and writing schedules as CSV files.
//!
//! A data directory holds:
//!
//! - `address_list.csv`: a header line, then one address per line
//! - `last_year_courses.csv`: `address,course` rows (1-based section)
//! - `last_year_assignments.csv`: rows of at least three addresses
//!
//! The solution is written to `assignment_solution.csv` with the header
//! `Position,Host,Guest1,Guest2,Section`, positions counted from 1.
//!
//! Missing optional files (courses, assignments) mean no history.

use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use dinnerforge_core::{
    DinnerForgeError, DinnerProblem, HistoricalPairs, PreviousHosting, Roster, Schedule,
    ScheduleRecord,
};
use thiserror::Error;
use tracing::debug;

pub const ADDRESS_LIST: &str = "address_list.csv";
pub const LAST_YEAR_COURSES: &str = "last_year_courses.csv";
pub const LAST_YEAR_ASSIGNMENTS: &str = "last_year_assignments.csv";
pub const SOLUTION: &str = "assignment_solution.csv";

/// Header of the solution file.
pub const SOLUTION_HEADER: [&str; 5] = ["Position", "Host", "Guest1", "Guest2", "Section"];

/// Errors from reading or writing data files.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}, line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error(transparent)]
    Domain(#[from] DinnerForgeError),
}

pub type DataResult<T> = std::result::Result<T, DataError>;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> DataError + '_ {
    move |source| DataError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn csv_error(path: &Path) -> impl FnOnce(csv::Error) -> DataError + '_ {
    move |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    }
}

/// All inputs of one event, as found in a data directory.
#[derive(Debug, Clone)]
pub struct DataSet {
    pub roster: Roster,
    pub previous_hosting: PreviousHosting,
    pub historical_pairs: HistoricalPairs,
}

impl DataSet {
    /// Loads the three input files from `dir`.
    ///
    /// The address list is required; the two files about last year are
    /// optional.
    pub fn load(dir: impl AsRef<Path>) -> DataResult<Self> {
        let dir = dir.as_ref();
        let roster = read_roster(dir.join(ADDRESS_LIST))?;

        let courses = dir.join(LAST_YEAR_COURSES);
        let previous_hosting = if courses.exists() {
            read_previous_hosting(&courses, &roster)?
        } else {
            PreviousHosting::new()
        };

        let assignments = dir.join(LAST_YEAR_ASSIGNMENTS);
        let historical_pairs = if assignments.exists() {
            read_historical_pairs(&assignments, &roster)?
        } else {
            HistoricalPairs::new()
        };

        debug!(
            event = "data_loaded",
            dir = %dir.display(),
            addresses = roster.len(),
            previous_hosts = previous_hosting.len(),
            historical_pairs = historical_pairs.len(),
        );

        Ok(DataSet {
            roster,
            previous_hosting,
            historical_pairs,
        })
    }

    pub fn problem(&self) -> DinnerProblem {
        DinnerProblem::new(self.roster.clone())
            .with_previous_hosting(self.previous_hosting.clone())
            .with_historical_pairs(self.historical_pairs.clone())
    }
}

/// Reads the address list: the first line is a header, blank lines are
/// skipped and every other line is one address.
pub fn read_roster(path: impl AsRef<Path>) -> DataResult<Roster> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    let addresses = text
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|line| !line.is_empty());
    Ok(Roster::new(addresses)?)
}

/// Reads `address,course` rows. Rows with fewer than two fields are
/// skipped; addresses not on the roster are ignored.
pub fn read_previous_hosting(
    path: impl AsRef<Path>,
    roster: &Roster,
) -> DataResult<PreviousHosting> {
    let path = path.as_ref();
    let mut records = Vec::new();
    for (line, row) in read_rows(path)? {
        if row.len() < 2 {
            continue;
        }
        let course = row[1].parse::<usize>().map_err(|_| DataError::Parse {
            path: path.to_path_buf(),
            line,
            message: format!("course '{}' is not a section number", &row[1]),
        })?;
        records.push((row[0].to_string(), course));
    }
    Ok(PreviousHosting::from_records(roster, records)?)
}

/// Reads last year's triplets. Only the first three fields of a row are
/// used and shorter rows are skipped.
pub fn read_historical_pairs(
    path: impl AsRef<Path>,
    roster: &Roster,
) -> DataResult<HistoricalPairs> {
    let triplets: Vec<[String; 3]> = read_rows(path.as_ref())?
        .into_iter()
        .filter(|(_, row)| row.len() >= 3)
        .map(|(_, row)| [row[0].to_string(), row[1].to_string(), row[2].to_string()])
        .collect();
    Ok(HistoricalPairs::from_triplets(roster, triplets))
}

/// Reads a solution file.
///
/// Rows need at least `Position,Host,Guest1,Guest2`. A position or section
/// that does not parse is taken from the row's place in the file, so the
/// verifier still sees every triplet.
pub fn read_schedule(path: impl AsRef<Path>) -> DataResult<Schedule> {
    let rows = read_rows(path.as_ref())?;
    let triplet_rows: Vec<StringRecord> = rows
        .into_iter()
        .map(|(_, row)| row)
        .filter(|row| row.len() >= 4)
        .collect();
    let section_size = Schedule::positional_section_size(triplet_rows.len());

    let records = triplet_rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let slot = row[0]
                .parse::<usize>()
                .ok()
                .and_then(|position| position.checked_sub(1))
                .unwrap_or(index);
            let section = row
                .get(4)
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(index / section_size + 1);
            ScheduleRecord {
                slot,
                host: row[1].to_string(),
                guest1: row[2].to_string(),
                guest2: row[3].to_string(),
                section,
            }
        })
        .collect();
    Ok(Schedule::new(records))
}

/// Writes the schedule with 1-based positions, creating parent
/// directories as needed.
pub fn write_schedule(path: impl AsRef<Path>, schedule: &Schedule) -> DataResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let mut writer = Writer::from_path(path).map_err(csv_error(path))?;
    writer.write_record(SOLUTION_HEADER).map_err(csv_error(path))?;
    for record in schedule.iter() {
        writer
            .write_record([
                (record.slot + 1).to_string(),
                record.host.clone(),
                record.guest1.clone(),
                record.guest2.clone(),
                record.section.to_string(),
            ])
            .map_err(csv_error(path))?;
    }
    writer.flush().map_err(io_error(path))?;

    debug!(event = "schedule_written", path = %path.display(), records = schedule.len());
    Ok(())
}

/// Data rows after the header, trimmed, with their line numbers.
fn read_rows(path: &Path) -> DataResult<Vec<(u64, StringRecord)>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(csv_error(path))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error(path))?;
        let line = row.position().map_or(0, |p| p.line());
        rows.push((line, row));
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "io_tests.rs"]
mod tests;
