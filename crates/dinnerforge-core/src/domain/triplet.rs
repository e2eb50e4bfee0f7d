//! Triplets and unordered participant pairs.

use std::fmt;

use super::ParticipantIndex;
use crate::error::{DinnerForgeError, Result};

/// Unordered pair of participants, stored with `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair {
    low: ParticipantIndex,
    high: ParticipantIndex,
}

impl Pair {
    /// Creates a canonical pair. Returns `None` for a self-pair.
    pub fn new(a: ParticipantIndex, b: ParticipantIndex) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Pair { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Pair { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn low(&self) -> ParticipantIndex {
        self.low
    }

    #[inline]
    pub fn high(&self) -> ParticipantIndex {
        self.high
    }

    pub fn contains(&self, p: ParticipantIndex) -> bool {
        self.low == p || self.high == p
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.low, self.high)
    }
}

/// One host and two guests sharing a course.
///
/// Guests are kept sorted so two triplets with the same members and host
/// compare equal regardless of guest order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triplet {
    host: ParticipantIndex,
    guests: [ParticipantIndex; 2],
}

impl Triplet {
    /// Creates a triplet without checking distinctness.
    ///
    /// Callers that build triplets from trusted enumeration use this; input
    /// from outside goes through [`Triplet::try_new`].
    pub fn new(
        host: ParticipantIndex,
        guest_a: ParticipantIndex,
        guest_b: ParticipantIndex,
    ) -> Self {
        let guests = if guest_a <= guest_b {
            [guest_a, guest_b]
        } else {
            [guest_b, guest_a]
        };
        Triplet { host, guests }
    }

    /// Creates a triplet, rejecting repeated members.
    pub fn try_new(
        host: ParticipantIndex,
        guest_a: ParticipantIndex,
        guest_b: ParticipantIndex,
    ) -> Result<Self> {
        if host == guest_a || host == guest_b || guest_a == guest_b {
            return Err(DinnerForgeError::DomainModel(format!(
                "triplet members must be distinct, got ({}, {}, {})",
                host, guest_a, guest_b
            )));
        }
        Ok(Triplet::new(host, guest_a, guest_b))
    }

    #[inline]
    pub fn host(&self) -> ParticipantIndex {
        self.host
    }

    #[inline]
    pub fn guests(&self) -> [ParticipantIndex; 2] {
        self.guests
    }

    /// Host first, then guests in ascending order.
    pub fn members(&self) -> [ParticipantIndex; 3] {
        [self.host, self.guests[0], self.guests[1]]
    }

    pub fn contains(&self, p: ParticipantIndex) -> bool {
        self.host == p || self.guests[0] == p || self.guests[1] == p
    }

    pub fn is_host(&self, p: ParticipantIndex) -> bool {
        self.host == p
    }

    /// The three unordered pairs formed by the members.
    ///
    /// Only meaningful for triplets with distinct members; a repeated member
    /// yields no pair for that combination.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> {
        let [h, a, b] = self.members();
        [Pair::new(h, a), Pair::new(h, b), Pair::new(a, b)]
            .into_iter()
            .flatten()
    }

    pub fn contains_pair(&self, pair: Pair) -> bool {
        self.contains(pair.low()) && self.contains(pair.high())
    }
}

impl fmt::Display for Triplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {}, {})", self.host, self.guests[0], self.guests[1])
    }
}
