//! Solutions: index-level `Assignment` and address-level `Schedule`.

use std::collections::BTreeSet;

use super::layout::SECTION_COUNT;
use super::{HistoricalPairs, Pair, Roster, SectionLayout, Triplet};
use crate::error::{DinnerForgeError, Result};

/// One triplet per slot, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    slots: Vec<Triplet>,
}

impl Assignment {
    pub fn new(slots: Vec<Triplet>) -> Self {
        Assignment { slots }
    }

    pub fn slots(&self) -> &[Triplet] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn triplet(&self, slot: usize) -> Option<&Triplet> {
        self.slots.get(slot)
    }

    /// Distinct historical pairs that meet again in this assignment.
    pub fn historical_reuse(&self, history: &HistoricalPairs) -> usize {
        let met: BTreeSet<Pair> = self.slots.iter().flat_map(Triplet::pairs).collect();
        met.into_iter().filter(|pair| history.contains(*pair)).count()
    }

    /// Resolves indices into addresses.
    ///
    /// # Errors
    ///
    /// Returns a `DomainModel` error when the assignment length does not
    /// match the layout or a member index is not on the roster.
    pub fn to_schedule(&self, roster: &Roster, layout: &SectionLayout) -> Result<Schedule> {
        if self.slots.len() != layout.slot_count() {
            return Err(DinnerForgeError::DomainModel(format!(
                "assignment has {} slots, layout expects {}",
                self.slots.len(),
                layout.slot_count()
            )));
        }
        let address = |index: usize| {
            roster.address(index).map(str::to_string).ok_or_else(|| {
                DinnerForgeError::DomainModel(format!(
                    "participant index {} is not on the roster of {}",
                    index,
                    roster.len()
                ))
            })
        };

        let mut records = Vec::with_capacity(self.slots.len());
        for (slot, triplet) in self.slots.iter().enumerate() {
            let [host, g1, g2] = triplet.members();
            records.push(ScheduleRecord {
                slot,
                host: address(host)?,
                guest1: address(g1)?,
                guest2: address(g2)?,
                section: layout.display_section(slot),
            });
        }
        Ok(Schedule::new(records))
    }
}

/// One row of the solution artifact.
///
/// `slot` is 0-based, `section` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleRecord {
    pub slot: usize,
    pub host: String,
    pub guest1: String,
    pub guest2: String,
    pub section: usize,
}

impl ScheduleRecord {
    pub fn members(&self) -> [&str; 3] {
        [&self.host, &self.guest1, &self.guest2]
    }
}

/// Address-level schedule, as written to and read from disk.
///
/// A schedule read from outside may be malformed; it is only trusted after
/// the verifier has checked it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    records: Vec<ScheduleRecord>,
}

impl Schedule {
    pub fn new(records: Vec<ScheduleRecord>) -> Self {
        Schedule { records }
    }

    /// Builds a schedule from `[host, guest1, guest2]` rows, assigning slot
    /// and section labels by position.
    pub fn from_triplets<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = [S; 3]>,
        S: AsRef<str>,
    {
        let rows: Vec<[S; 3]> = rows.into_iter().collect();
        let section_size = Self::positional_section_size(rows.len());
        let records = rows
            .iter()
            .enumerate()
            .map(|(slot, [host, g1, g2])| ScheduleRecord {
                slot,
                host: host.as_ref().to_string(),
                guest1: g1.as_ref().to_string(),
                guest2: g2.as_ref().to_string(),
                section: slot / section_size + 1,
            })
            .collect();
        Schedule { records }
    }

    /// Section size used when sections are derived from position:
    /// `ceil(len / 3)`, at least one.
    pub fn positional_section_size(len: usize) -> usize {
        len.div_ceil(SECTION_COUNT).max(1)
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleRecord> {
        self.records.iter()
    }
}
