//! The complete input of one scheduling run.

use super::{HistoricalPairs, PreviousHosting, Roster, SectionLayout};
use crate::error::Result;

/// Roster plus history, read-only for the rest of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct DinnerProblem {
    roster: Roster,
    previous_hosting: PreviousHosting,
    historical_pairs: HistoricalPairs,
}

impl DinnerProblem {
    /// Problem with no history.
    pub fn new(roster: Roster) -> Self {
        DinnerProblem {
            roster,
            previous_hosting: PreviousHosting::new(),
            historical_pairs: HistoricalPairs::new(),
        }
    }

    pub fn with_previous_hosting(mut self, previous_hosting: PreviousHosting) -> Self {
        self.previous_hosting = previous_hosting;
        self
    }

    pub fn with_historical_pairs(mut self, historical_pairs: HistoricalPairs) -> Self {
        self.historical_pairs = historical_pairs;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn previous_hosting(&self) -> &PreviousHosting {
        &self.previous_hosting
    }

    pub fn historical_pairs(&self) -> &HistoricalPairs {
        &self.historical_pairs
    }

    pub fn participant_count(&self) -> usize {
        self.roster.len()
    }

    /// Section layout for this roster; fails when N is not a positive
    /// multiple of three.
    pub fn layout(&self) -> Result<SectionLayout> {
        SectionLayout::for_participants(self.roster.len())
    }
}
