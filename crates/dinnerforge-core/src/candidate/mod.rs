//! Candidate generation for the triplet-to-slot search space
//!
//! Every possible triplet (host plus an unordered guest pair) is a
//! candidate. A candidate may be placed in any slot of a section its host
//! did not host in last time. Lookup tables by member, by host and by
//! unordered pair are built alongside so the encoder can emit each
//! constraint family in one pass.


use crate::domain::{
    DinnerProblem, Pair, ParticipantIndex, SectionLayout, Triplet, SECTION_COUNT,
};
use crate::error::Result;

/// Dense index into a [`CandidateSet`].
pub type CandidateId = usize;

/// A triplet together with the sections it may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    triplet: Triplet,
    eligible_sections: [bool; SECTION_COUNT],
}

impl Candidate {
    pub fn triplet(&self) -> Triplet {
        self.triplet
    }

    /// Whether the candidate may occupy a slot of the 0-based section.
    pub fn is_eligible_in(&self, section: usize) -> bool {
        self.eligible_sections.get(section).copied().unwrap_or(false)
    }

    pub fn eligible_sections(&self) -> impl Iterator<Item = usize> + '_ {
        (0..SECTION_COUNT).filter(|&s| self.eligible_sections[s])
    }
}

/// All candidates of a problem, with lookup tables.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    layout: SectionLayout,
    participant_count: usize,
    candidates: Vec<Candidate>,
    by_member: Vec<Vec<CandidateId>>,
    by_host: Vec<Vec<CandidateId>>,
    by_pair: Vec<Vec<CandidateId>>,
}

impl CandidateSet {
    /// Enumerates all candidates for the problem.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when the participant count is zero or not a
    /// multiple of three. Nothing is generated in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use dinnerforge_core::{CandidateSet, DinnerProblem, Roster};
    ///
    /// let roster = Roster::new((0..6).map(|i| format!("house {}", i))).unwrap();
    /// let candidates = CandidateSet::generate(&DinnerProblem::new(roster)).unwrap();
    /// assert_eq!(candidates.len(), CandidateSet::expected_len(6));
    /// ```
    pub fn generate(problem: &DinnerProblem) -> Result<Self> {
        let layout = problem.layout()?;
        let n = problem.participant_count();
        let hosting = problem.previous_hosting();

        let mut set = CandidateSet {
            layout,
            participant_count: n,
            candidates: Vec::with_capacity(Self::expected_len(n)),
            by_member: vec![Vec::new(); n],
            by_host: vec![Vec::new(); n],
            by_pair: vec![Vec::new(); n * (n - 1) / 2],
        };

        for host in 0..n {
            let mut eligible_sections = [true; SECTION_COUNT];
            if let Some(section) = hosting.section_of(host) {
                if let Some(flag) = eligible_sections.get_mut(section) {
                    *flag = false;
                }
            }
            for a in 0..n {
                if a == host {
                    continue;
                }
                for b in (a + 1)..n {
                    if b == host {
                        continue;
                    }
                    set.push(Candidate {
                        triplet: Triplet::new(host, a, b),
                        eligible_sections,
                    });
                }
            }
        }

        Ok(set)
    }

    fn push(&mut self, candidate: Candidate) {
        let id = self.candidates.len();
        let triplet = candidate.triplet;
        for member in triplet.members() {
            self.by_member[member].push(id);
        }
        self.by_host[triplet.host()].push(id);
        for pair in triplet.pairs() {
            let index = self.pair_index(pair);
            self.by_pair[index].push(id);
        }
        self.candidates.push(candidate);
    }

    /// `N * C(N - 1, 2)`: a host and an unordered guest pair from the rest.
    pub fn expected_len(participant_count: usize) -> usize {
        let n = participant_count;
        if n < 3 {
            return 0;
        }
        n * (n - 1) * (n - 2) / 2
    }

    /// Triangular index of a pair among `participant_count` participants.
    fn pair_index(&self, pair: Pair) -> usize {
        let n = self.participant_count;
        let (low, high) = (pair.low(), pair.high());
        low * (2 * n - low - 1) / 2 + (high - low - 1)
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, id: CandidateId) -> Option<&Candidate> {
        self.candidates.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (CandidateId, &Candidate)> {
        self.candidates.iter().enumerate()
    }

    /// Candidates that include the participant as host or guest.
    pub fn containing(&self, participant: ParticipantIndex) -> &[CandidateId] {
        self.by_member
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Candidates hosted by the participant.
    pub fn hosted_by(&self, participant: ParticipantIndex) -> &[CandidateId] {
        self.by_host
            .get(participant)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Candidates that include both members of the pair.
    pub fn containing_pair(&self, pair: Pair) -> &[CandidateId] {
        if pair.high() >= self.participant_count {
            return &[];
        }
        self.by_pair
            .get(self.pair_index(pair))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every unordered pair of participants, in ascending order.
    pub fn pairs(&self) -> impl Iterator<Item = Pair> + '_ {
        let n = self.participant_count;
        (0..n).flat_map(move |a| ((a + 1)..n).filter_map(move |b| Pair::new(a, b)))
    }

    /// Slots the candidate may occupy, in ascending order.
    pub fn eligible_slots(&self, id: CandidateId) -> impl Iterator<Item = usize> + '_ {
        let layout = self.layout;
        self.candidates
            .get(id)
            .into_iter()
            .flat_map(move |c| c.eligible_sections().flat_map(move |s| layout.slots(s)))
    }

    /// Total number of (candidate, slot) placements.
    pub fn placement_count(&self) -> usize {
        self.candidates
            .iter()
            .map(|c| c.eligible_sections().count() * self.layout.section_size())
            .sum()
    }
}
