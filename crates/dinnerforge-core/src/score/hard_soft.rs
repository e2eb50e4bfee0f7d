//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use super::ScoreParseError;

/// A score with separate hard and soft constraint levels.
///
/// Hard constraints must be satisfied for a schedule to be feasible.
/// The soft level counts reused historical pairs.
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use dinnerforge_core::HardSoftScore;
///
/// let broken = HardSoftScore::of(-1, 0);      // one hard violation
/// let reused = HardSoftScore::of(0, -4);      // feasible, four pairs reused
///
/// assert!(reused > broken);
/// assert!(reused.is_feasible());
/// assert_eq!(reused.to_string(), "0hard/-4soft");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// Creates a new HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Creates a score from violation counts (both are negated).
    pub fn from_penalties(hard_violations: usize, soft_violations: usize) -> Self {
        HardSoftScore::of(-(hard_violations as i64), -(soft_violations as i64))
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// A schedule is feasible when no hard constraint is broken.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        HardSoftScore::of(self.hard + rhs.hard, self.soft + rhs.soft)
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        HardSoftScore::of(self.hard - rhs.hard, self.soft - rhs.soft)
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl FromStr for HardSoftScore {
    type Err = ScoreParseError;

    /// Parses `"<hard>hard/<soft>soft"`, e.g. `"0hard/-3soft"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hard_part, soft_part) = trimmed
            .split_once('/')
            .ok_or_else(|| ScoreParseError::new(s, "expected '<hard>hard/<soft>soft'"))?;

        let hard = hard_part
            .trim()
            .strip_suffix("hard")
            .ok_or_else(|| ScoreParseError::new(s, "missing 'hard' suffix"))?
            .parse::<i64>()
            .map_err(|e| ScoreParseError::new(s, e.to_string()))?;
        let soft = soft_part
            .trim()
            .strip_suffix("soft")
            .ok_or_else(|| ScoreParseError::new(s, "missing 'soft' suffix"))?
            .parse::<i64>()
            .map_err(|e| ScoreParseError::new(s, e.to_string()))?;

        Ok(HardSoftScore::of(hard, soft))
    }
}
