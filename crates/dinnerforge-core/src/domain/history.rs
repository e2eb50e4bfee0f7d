//! Data from the previous occurrence of the event.

use std::collections::{BTreeSet, HashMap};

use super::layout::SECTION_COUNT;
use super::{Pair, ParticipantIndex, Roster};
use crate::error::{DinnerForgeError, Result};

/// Section each participant hosted in last time.
///
/// Stored 0-based; input records use 1-based section numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviousHosting {
    sections: HashMap<ParticipantIndex, usize>,
}

impl PreviousHosting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from `(address, 1-based section)` records.
    ///
    /// Addresses not on the roster are ignored, whatever their section.
    /// A listed address with a section outside `1..=3` is a `DomainModel`
    /// error. A later record for the same address replaces an earlier one.
    pub fn from_records<I, S>(roster: &Roster, records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: AsRef<str>,
    {
        let mut hosting = PreviousHosting::new();
        for (address, section) in records {
            let address = address.as_ref();
            let Some(index) = roster.index_of(address) else {
                continue;
            };
            if !(1..=SECTION_COUNT).contains(&section) {
                return Err(DinnerForgeError::DomainModel(format!(
                    "previous section {} for '{}' is outside 1..={}",
                    section,
                    address.trim(),
                    SECTION_COUNT
                )));
            }
            hosting.sections.insert(index, section - 1);
        }
        Ok(hosting)
    }

    /// Records a 0-based section directly.
    pub fn insert(&mut self, participant: ParticipantIndex, section: usize) {
        self.sections.insert(participant, section);
    }

    /// 0-based section the participant hosted in, if known.
    pub fn section_of(&self, participant: ParticipantIndex) -> Option<usize> {
        self.sections.get(&participant).copied()
    }

    /// Whether the participant may not host in the given 0-based section.
    pub fn forbids(&self, participant: ParticipantIndex, section: usize) -> bool {
        self.section_of(participant) == Some(section)
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantIndex, usize)> + '_ {
        self.sections.iter().map(|(&p, &s)| (p, s))
    }
}

/// Unordered pairs that shared a triplet last time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoricalPairs {
    pairs: BTreeSet<Pair>,
}

impl HistoricalPairs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from previous triplets given as addresses.
    ///
    /// Every combination of two known members becomes a pair; unknown
    /// addresses are dropped, so a triplet with one unknown member still
    /// contributes the pair of the other two.
    pub fn from_triplets<I, S>(roster: &Roster, triplets: I) -> Self
    where
        I: IntoIterator<Item = [S; 3]>,
        S: AsRef<str>,
    {
        let mut history = HistoricalPairs::new();
        for triplet in triplets {
            let known: Vec<ParticipantIndex> = triplet
                .iter()
                .filter_map(|address| roster.index_of(address.as_ref()))
                .collect();
            for (i, &a) in known.iter().enumerate() {
                for &b in &known[i + 1..] {
                    if let Some(pair) = Pair::new(a, b) {
                        history.pairs.insert(pair);
                    }
                }
            }
        }
        history
    }

    pub fn insert(&mut self, pair: Pair) -> bool {
        self.pairs.insert(pair)
    }

    pub fn contains(&self, pair: Pair) -> bool {
        self.pairs.contains(&pair)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Pair> + '_ {
        self.pairs.iter().copied()
    }
}

impl FromIterator<Pair> for HistoricalPairs {
    fn from_iter<T: IntoIterator<Item = Pair>>(iter: T) -> Self {
        HistoricalPairs {
            pairs: iter.into_iter().collect(),
        }
    }
}
