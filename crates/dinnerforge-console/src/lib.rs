//! Colorful console output for DinnerForge.
//!
//! Provides a custom `tracing` layer that formats solver events with colors,
//! and renderers for schedules and verification reports.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solve start/end, new best schedule, progress)
//! - **DEBUG**: Per-worker and backend details
//! - **TRACE**: Individual branching decisions

mod report;

#[cfg(test)]
mod tests;

pub use report::{print_report, print_schedule, render_report, render_schedule};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing. `RUST_LOG` overrides the default
/// `info` level for the solver.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DinnerConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____  _                       _____
|  _ \(_)_ __  _ __   ___ _ __|  ___|__  _ __ __ _  ___
| | | | | '_ \| '_ \ / _ \ '__| |_ / _ \| '__/ _` |/ _ \
| |_| | | | | | | | |  __/ |  |  _| (_) | | | (_| |  __/
|____/|_|_| |_|_| |_|\___|_|  |_|  \___/|_|  \__, |\___|
                                             |___/
"#;

    let version_line = format!(
        "                   v{} - Running Dinner Scheduler\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats solver events with colors.
pub struct DinnerConsoleLayer;

impl<S: Subscriber> Layer<S> for DinnerConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();

        // Only handle solver events
        if !target.starts_with("dinnerforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    status: Option<String>,
    score: Option<String>,
    backend: Option<String>,
    best_objective: Option<String>,
    participant_count: Option<u64>,
    candidate_count: Option<u64>,
    historical_pair_count: Option<u64>,
    worker_count: Option<u64>,
    time_limit_secs: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    worker: Option<u64>,
    nodes: Option<u64>,
    conflicts: Option<u64>,
    speed: Option<u64>,
    elapsed_ms: Option<u64>,
    duration_ms: Option<u64>,
    objective: Option<i64>,
    feasible: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "score" => self.score = Some(s),
            "backend" => self.backend = Some(s),
            "best_objective" => self.best_objective = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "participant_count" => self.participant_count = Some(value),
            "candidate_count" => self.candidate_count = Some(value),
            "historical_pair_count" => self.historical_pair_count = Some(value),
            "worker_count" => self.worker_count = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "worker" => self.worker = Some(value),
            "nodes" => self.nodes = Some(value),
            "conflicts" => self.conflicts = Some(value),
            "speed" => self.speed = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "objective" => self.objective = Some(value as i64),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            _ => {
                if let Ok(value) = u64::try_from(value) {
                    self.record_u64(field, value);
                }
            }
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "score" => self.score = Some(value.to_string()),
            "backend" => self.backend = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "solve_start" => format_solve_start(v),
        "encode_end" => format_encode_end(v),
        "new_best" => format_new_best(v),
        "progress" => format_progress(v),
        "solve_end" => format_solve_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let participants = v.participant_count.unwrap_or(0);
    let candidates = v.candidate_count.unwrap_or(0);
    let history = v.historical_pair_count.unwrap_or(0);
    let workers = v.worker_count.unwrap_or(1);
    let time_limit = v.time_limit_secs.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} participants │ {} candidate triplets │ {} historical pairs │ \
         {} workers",
        format_elapsed(),
        "▶".bright_green().bold(),
        format_count(participants).bright_yellow(),
        format_count(candidates).bright_yellow(),
        format_count(history).bright_yellow(),
        workers.bright_yellow()
    );

    if time_limit > 0 {
        output.push_str(&format!(
            " │ {}s limit",
            format_count(time_limit).bright_yellow()
        ));
    }

    if let Some(ref backend) = v.backend {
        output.push_str(&format!(" │ {}", backend.white()));
    }

    output
}

fn format_encode_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Model │ {} variables │ {} constraints",
        format_elapsed(),
        "◆".bright_blue(),
        format_count(v.variables.unwrap_or(0)).white(),
        format_count(v.constraints.unwrap_or(0)).white()
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    let objective = v.objective.unwrap_or(0);
    format!(
        "{} {} New best │ {} reused pairs │ worker {} │ {} nodes",
        format_elapsed(),
        "★".bright_green().bold(),
        format_objective(objective),
        v.worker.unwrap_or(0),
        format_count(v.nodes.unwrap_or(0)).white()
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let nodes = v.nodes.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let best = match v.best_objective.as_deref().and_then(parse_some) {
        Some(best) => format_objective(best),
        None => "-".white().to_string(),
    };

    format!(
        "{} {} {:>12} nodes │ {:>10}/s │ {} conflicts │ best {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        format_count(nodes).white(),
        format_count(speed).bright_magenta().bold(),
        format_count(v.conflicts.unwrap_or(0)).white(),
        best
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("Unknown");
    let feasible = v.feasible.unwrap_or(false);
    let duration = v.duration_ms.unwrap_or(0);

    let status_colored = if feasible {
        status.bright_green().bold().to_string()
    } else {
        status.bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} │ {} nodes",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_colored,
        format_duration_ms(duration).yellow(),
        format_count(v.nodes.unwrap_or(0)).white()
    );

    if let Some(objective) = v.objective {
        output.push_str(&format!(" │ {} reused pairs", format_objective(objective)));
    }
    if let Some(ref score) = v.score {
        output.push_str(&format!(" │ {}", format_score(score)));
    }

    output
}

/// Reads the value out of a `Some(..)` debug rendering.
fn parse_some(s: &str) -> Option<i64> {
    s.strip_prefix("Some(")?.strip_suffix(')')?.parse().ok()
}

fn format_objective(objective: i64) -> String {
    if objective == 0 {
        objective.bright_green().bold().to_string()
    } else {
        objective.yellow().bold().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/').filter(|_| score.contains("hard")) else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}
