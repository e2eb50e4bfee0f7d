//! Participant roster.

use std::collections::HashMap;

use super::ParticipantIndex;
use crate::error::{DinnerForgeError, Result};

/// Ordered list of unique participant addresses.
///
/// The index of an address is its position in read order. The roster is
/// immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    addresses: Vec<String>,
    index: HashMap<String, ParticipantIndex>,
}

impl Roster {
    /// Builds a roster from addresses in read order.
    ///
    /// Addresses are trimmed. Blank or repeated addresses are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinnerforge_core::Roster;
    ///
    /// let roster = Roster::new(["Elm St 1", "Oak Ave 2", "Pine Rd 3"]).unwrap();
    /// assert_eq!(roster.len(), 3);
    /// assert_eq!(roster.index_of("Oak Ave 2"), Some(1));
    /// assert!(Roster::new(["a", "a"]).is_err());
    /// ```
    pub fn new<I, S>(addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut roster = Roster::default();
        for (position, raw) in addresses.into_iter().enumerate() {
            let address = raw.as_ref().trim();
            if address.is_empty() {
                return Err(DinnerForgeError::DomainModel(format!(
                    "blank address at position {}",
                    position
                )));
            }
            if roster.index.contains_key(address) {
                return Err(DinnerForgeError::DomainModel(format!(
                    "duplicate address '{}' at position {}",
                    address, position
                )));
            }
            roster.index.insert(address.to_string(), roster.addresses.len());
            roster.addresses.push(address.to_string());
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn index_of(&self, address: &str) -> Option<ParticipantIndex> {
        self.index.get(address.trim()).copied()
    }

    pub fn address(&self, index: ParticipantIndex) -> Option<&str> {
        self.addresses.get(index).map(String::as_str)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.index_of(address).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticipantIndex, &str)> {
        self.addresses.iter().map(String::as_str).enumerate()
    }

    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }
}
