//! Colored rendering of schedules and verification reports.

use std::io::{self, Write};

use dinnerforge_core::Schedule;
use dinnerforge_verify::{Category, VerificationReport};
use owo_colors::OwoColorize;

/// Renders the report grouped by category with one line per check.
pub fn render_report(report: &VerificationReport) -> String {
    let mut output = String::new();

    for category in Category::ALL {
        let heading = if report.category_valid(category) {
            category.title().bright_white().bold().to_string()
        } else {
            category.title().bright_red().bold().to_string()
        };
        output.push_str(&heading);
        output.push('\n');

        for check in report.category(category) {
            let mark = if check.passed() {
                "✓".bright_green().to_string()
            } else if check.is_hard {
                "✗".bright_red().bold().to_string()
            } else {
                "!".yellow().bold().to_string()
            };
            if check.passed() {
                output.push_str(&format!("  {} {}\n", mark, check.name));
            } else {
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    mark,
                    check.name,
                    check.violation_count()
                ));
            }
            for violation in &check.violations {
                output.push_str(&format!("      {}\n", violation.to_string().bright_black()));
            }
        }
    }

    let verdict = if report.all_valid() {
        "ALL CHECKS PASSED".bright_green().bold().to_string()
    } else {
        "VERIFICATION FAILED".bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "\n{} │ {} reused historical pairs │ {}",
        verdict,
        report.historical_reuse_count(),
        report.score()
    ));
    output
}

/// Renders the schedule as one block per section.
pub fn render_schedule(schedule: &Schedule) -> String {
    let mut output = String::new();
    let mut current_section = None;

    for record in schedule.iter() {
        if current_section != Some(record.section) {
            current_section = Some(record.section);
            output.push_str(&format!(
                "{}\n",
                format!("Section {}", record.section).bright_cyan().bold()
            ));
        }
        output.push_str(&format!(
            "  {:>4}  {} {} {}, {}\n",
            (record.slot + 1).bright_black(),
            record.host.bright_white().bold(),
            "←".bright_black(),
            record.guest1,
            record.guest2
        ));
    }
    output
}

pub fn print_report(report: &VerificationReport) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", render_report(report));
    let _ = stdout.flush();
}

pub fn print_schedule(schedule: &Schedule) {
    let mut stdout = io::stdout().lock();
    let _ = write!(stdout, "{}", render_schedule(schedule));
    let _ = stdout.flush();
}
