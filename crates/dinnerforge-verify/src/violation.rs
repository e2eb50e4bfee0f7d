//! Violations found by the verifier.

use std::fmt;

/// Group of related checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    BasicStructure,
    Participation,
    Sections,
    Pairs,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::BasicStructure,
        Category::Participation,
        Category::Sections,
        Category::Pairs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Category::BasicStructure => "Basic structure",
            Category::Participation => "Participation",
            Category::Sections => "Sections",
            Category::Pairs => "Pairs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A single failed check.
///
/// `position` is the 0-based index of a record in the schedule; sections
/// are 1-based as in the artifact. Addresses are reported trimmed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    /// The schedule does not have one record per roster address.
    WrongLength { expected: usize, actual: usize },
    /// A record names the same address more than once.
    MalformedTriplet { position: usize, address: String },
    /// A record names an address that is not on the roster.
    UnknownAddress { position: usize, address: String },
    /// A record's slot label does not match its position.
    SlotLabelMismatch { position: usize, label: usize },
    /// A record's section label does not match its position.
    SectionLabelMismatch {
        position: usize,
        expected: usize,
        label: usize,
    },
    /// A roster address appears other than three times.
    AppearanceCount { address: String, count: usize },
    /// A roster address hosts other than once.
    HostCount { address: String, count: usize },
    /// A roster address never appears.
    MissingAddress { address: String },
    /// The number of distinct addresses differs from the roster size.
    ParticipantCountMismatch { expected: usize, actual: usize },
    /// A roster address appears other than once in a section.
    SectionDistribution {
        address: String,
        section: usize,
        count: usize,
    },
    /// A host hosts in the section they hosted in last time.
    PreviousSection {
        address: String,
        position: usize,
        section: usize,
    },
    /// Two addresses share more than one triplet.
    DuplicatePair {
        first: String,
        second: String,
        count: usize,
    },
    /// Two addresses that met last time meet again.
    HistoricalPairReused { first: String, second: String },
}

impl Violation {
    pub fn category(&self) -> Category {
        match self {
            Violation::WrongLength { .. }
            | Violation::MalformedTriplet { .. }
            | Violation::UnknownAddress { .. }
            | Violation::SlotLabelMismatch { .. }
            | Violation::SectionLabelMismatch { .. } => Category::BasicStructure,
            Violation::AppearanceCount { .. }
            | Violation::HostCount { .. }
            | Violation::MissingAddress { .. }
            | Violation::ParticipantCountMismatch { .. } => Category::Participation,
            Violation::SectionDistribution { .. } | Violation::PreviousSection { .. } => {
                Category::Sections
            }
            Violation::DuplicatePair { .. } | Violation::HistoricalPairReused { .. } => {
                Category::Pairs
            }
        }
    }

    /// Whether the violation makes the schedule invalid. Historical reuse is
    /// the only soft violation.
    pub fn is_hard(&self) -> bool {
        !matches!(self, Violation::HistoricalPairReused { .. })
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::WrongLength { expected, actual } => {
                write!(f, "schedule has {} records, expected {}", actual, expected)
            }
            Violation::MalformedTriplet { position, address } => {
                write!(f, "record {}: '{}' appears more than once", position, address)
            }
            Violation::UnknownAddress { position, address } => {
                write!(f, "record {}: '{}' is not on the address list", position, address)
            }
            Violation::SlotLabelMismatch { position, label } => {
                write!(f, "record {}: labelled as slot {}", position, label)
            }
            Violation::SectionLabelMismatch {
                position,
                expected,
                label,
            } => write!(
                f,
                "record {}: labelled section {}, expected {}",
                position, label, expected
            ),
            Violation::AppearanceCount { address, count } => {
                write!(f, "'{}' appears {} times, expected 3", address, count)
            }
            Violation::HostCount { address, count } => {
                write!(f, "'{}' hosts {} times, expected 1", address, count)
            }
            Violation::MissingAddress { address } => write!(f, "'{}' is never assigned", address),
            Violation::ParticipantCountMismatch { expected, actual } => write!(
                f,
                "{} distinct participants, expected {}",
                actual, expected
            ),
            Violation::SectionDistribution {
                address,
                section,
                count,
            } => write!(
                f,
                "'{}' appears {} times in section {}, expected 1",
                address, count, section
            ),
            Violation::PreviousSection {
                address,
                position,
                section,
            } => write!(
                f,
                "record {}: '{}' hosts in section {} again",
                position, address, section
            ),
            Violation::DuplicatePair {
                first,
                second,
                count,
            } => write!(f, "'{}' and '{}' meet {} times", first, second, count),
            Violation::HistoricalPairReused { first, second } => {
                write!(f, "'{}' and '{}' met last time", first, second)
            }
        }
    }
}
