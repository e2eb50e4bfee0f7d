//! Verification report with per-check breakdown.

use std::fmt;

use dinnerforge_core::HardSoftScore;

use crate::violation::{Category, Violation};

/// Outcome of one named check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Short description of what is checked.
    pub name: &'static str,
    pub category: Category,
    /// Whether failing this check makes the schedule invalid.
    pub is_hard: bool,
    /// Violations in ascending order.
    pub violations: Vec<Violation>,
}

impl CheckResult {
    pub(crate) fn new(
        name: &'static str,
        category: Category,
        is_hard: bool,
        mut violations: Vec<Violation>,
    ) -> Self {
        violations.sort();
        violations.dedup();
        CheckResult {
            name,
            category,
            is_hard,
            violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }
}

/// Complete verification result.
///
/// Checks are listed in a fixed order grouped by [`Category`]; the
/// violations inside each check are sorted, so two reports for the same
/// input compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    checks: Vec<CheckResult>,
    score: HardSoftScore,
}

impl VerificationReport {
    pub(crate) fn new(checks: Vec<CheckResult>) -> Self {
        let hard = checks
            .iter()
            .filter(|c| c.is_hard)
            .map(CheckResult::violation_count)
            .sum();
        let soft = checks
            .iter()
            .filter(|c| !c.is_hard)
            .map(CheckResult::violation_count)
            .sum();
        VerificationReport {
            checks,
            score: HardSoftScore::from_penalties(hard, soft),
        }
    }

    /// True when every hard check passes. Historical reuse does not count.
    pub fn all_valid(&self) -> bool {
        self.checks.iter().filter(|c| c.is_hard).all(CheckResult::passed)
    }

    /// True when every check passes, soft ones included.
    pub fn is_fully_satisfied(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }

    /// One hard point per hard violation, one soft point per reused pair.
    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    /// Distinct historical pairs that meet again.
    pub fn historical_reuse_count(&self) -> usize {
        self.violations()
            .filter(|v| matches!(v, Violation::HistoricalPairReused { .. }))
            .count()
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    /// Checks of one category.
    pub fn category(&self, category: Category) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(move |c| c.category == category)
    }

    /// Whether every hard check of the category passes.
    pub fn category_valid(&self, category: Category) -> bool {
        self.category(category)
            .filter(|c| c.is_hard)
            .all(CheckResult::passed)
    }

    /// All violations in report order.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.checks.iter().flat_map(|c| &c.violations)
    }

    pub fn hard_violations(&self) -> impl Iterator<Item = &Violation> {
        self.violations().filter(|v| v.is_hard())
    }

    pub fn violation_count(&self) -> usize {
        self.checks.iter().map(CheckResult::violation_count).sum()
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for category in Category::ALL {
            writeln!(f, "{}", category)?;
            for check in self.category(category) {
                let mark = if check.passed() {
                    "✓"
                } else if check.is_hard {
                    "✗"
                } else {
                    "!"
                };
                if check.passed() {
                    writeln!(f, "  {} {}", mark, check.name)?;
                } else {
                    writeln!(f, "  {} {} ({})", mark, check.name, check.violation_count())?;
                }
                for violation in &check.violations {
                    writeln!(f, "      {}", violation)?;
                }
            }
        }
        let verdict = if self.all_valid() { "VALID" } else { "INVALID" };
        write!(f, "{} ({})", verdict, self.score)
    }
}
