//! Encoding of the scheduling rules as a boolean linear model.
//!
//! Variables:
//! - `used[t]`: candidate `t` appears somewhere in the schedule
//! - `placed[t, slot]`: candidate `t` occupies `slot` (only for slots in a
//!   section the candidate is eligible for)
//! - `penalty[h]`: historical pair `h` meets again
//!
//! The objective is the sum of the penalty variables.

use dinnerforge_core::{
    Assignment, CandidateId, CandidateSet, DinnerForgeError, DinnerProblem, Pair, Result, Triplet,
};

use crate::model::{BoolVar, LinearExpr, LinearModel};

/// Constraint category tags.
pub mod category {
    pub const LINKING: &str = "linking";
    pub const SLOT_COVERAGE: &str = "slot_coverage";
    pub const PARTICIPATION: &str = "participation";
    pub const SECTION_COVERAGE: &str = "section_coverage";
    pub const HOSTING: &str = "hosting";
    pub const PAIRWISE: &str = "pairwise";
    pub const HISTORICAL_PENALTY: &str = "historical_penalty";
}

/// Appearances of every participant in a valid schedule.
pub const APPEARANCES_PER_PARTICIPANT: i64 = 3;

/// A `placed` variable together with what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub candidate: CandidateId,
    pub slot: usize,
    pub var: BoolVar,
}

/// The linear model of one problem plus the variable bookkeeping needed to
/// read a backend assignment back.
#[derive(Debug, Clone)]
pub struct ScheduleEncoding {
    model: LinearModel,
    triplets: Vec<Triplet>,
    used: Vec<BoolVar>,
    placements: Vec<Placement>,
    penalties: Vec<(Pair, BoolVar)>,
    slot_count: usize,
}

impl ScheduleEncoding {
    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    /// `used` variable of each candidate, indexed by candidate id.
    pub fn used_vars(&self) -> &[BoolVar] {
        &self.used
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn penalties(&self) -> &[(Pair, BoolVar)] {
        &self.penalties
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Reads the assignment out of a backend solution.
    ///
    /// # Errors
    ///
    /// Returns a `Solver` error when the value vector does not fit the
    /// model or a slot is filled zero or several times.
    pub fn decode(&self, values: &[bool]) -> Result<Assignment> {
        if values.len() != self.model.variable_count() {
            return Err(DinnerForgeError::Solver(format!(
                "backend returned {} values for {} variables",
                values.len(),
                self.model.variable_count()
            )));
        }

        let mut slots: Vec<Option<Triplet>> = vec![None; self.slot_count];
        for placement in &self.placements {
            if !values[placement.var.index()] {
                continue;
            }
            let triplet = self.triplets[placement.candidate];
            match &slots[placement.slot] {
                Some(existing) => {
                    return Err(DinnerForgeError::Solver(format!(
                        "slot {} filled twice: {} and {}",
                        placement.slot, existing, triplet
                    )));
                }
                None => slots[placement.slot] = Some(triplet),
            }
        }

        let mut filled = Vec::with_capacity(self.slot_count);
        for (slot, triplet) in slots.into_iter().enumerate() {
            match triplet {
                Some(t) => filled.push(t),
                None => {
                    return Err(DinnerForgeError::Solver(format!(
                        "slot {} left empty by the backend",
                        slot
                    )));
                }
            }
        }
        Ok(Assignment::new(filled))
    }
}

/// Builds the linear model for a problem and its candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleEncoder;

impl ScheduleEncoder {
    pub fn new() -> Self {
        ScheduleEncoder
    }

    /// Encodes every scheduling rule over the given candidates.
    ///
    /// # Errors
    ///
    /// Returns a `DomainModel` error when the candidates do not belong to
    /// the problem: wrong participant count, a member out of range or
    /// repeated, an eligible slot outside the layout, or a historical pair
    /// naming an unknown participant.
    pub fn encode(
        &self,
        problem: &DinnerProblem,
        candidates: &CandidateSet,
    ) -> Result<ScheduleEncoding> {
        Self::validate(problem, candidates)?;

        let n = candidates.participant_count();
        let layout = *candidates.layout();
        let mut model = LinearModel::new();

        let used: Vec<BoolVar> = (0..candidates.len()).map(|_| model.new_bool_var()).collect();

        let mut placements = Vec::with_capacity(candidates.placement_count());
        let mut by_candidate: Vec<Vec<Placement>> = vec![Vec::new(); candidates.len()];
        let mut by_slot: Vec<Vec<BoolVar>> = vec![Vec::new(); layout.slot_count()];
        for (id, _) in candidates.iter() {
            for slot in candidates.eligible_slots(id) {
                let placement = Placement {
                    candidate: id,
                    slot,
                    var: model.new_bool_var(),
                };
                placements.push(placement);
                by_candidate[id].push(placement);
                by_slot[slot].push(placement.var);
            }
        }

        // A used candidate occupies exactly one slot; an unused one none.
        for (id, candidate) in candidates.iter() {
            let mut expr = LinearExpr::sum(by_candidate[id].iter().map(|p| p.var));
            expr.add_term(used[id], -1);
            model.add_eq(
                category::LINKING,
                format!("candidate {}", candidate.triplet()),
                expr,
                0,
            );
        }

        for (slot, vars) in by_slot.iter().enumerate() {
            model.add_eq(
                category::SLOT_COVERAGE,
                format!("slot {}", slot),
                LinearExpr::sum(vars.iter().copied()),
                1,
            );
        }

        for p in 0..n {
            let containing = candidates.containing(p);
            model.add_eq(
                category::PARTICIPATION,
                format!("participant {}", p),
                LinearExpr::sum(containing.iter().map(|&id| used[id])),
                APPEARANCES_PER_PARTICIPANT,
            );

            for section in layout.sections() {
                let slots = layout.slots(section);
                let mut vars = Vec::new();
                for &id in containing {
                    vars.extend(
                        by_candidate[id]
                            .iter()
                            .filter(|pl| slots.contains(&pl.slot))
                            .map(|pl| pl.var),
                    );
                }
                model.add_eq(
                    category::SECTION_COVERAGE,
                    format!("participant {} in section {}", p, section + 1),
                    LinearExpr::sum(vars),
                    1,
                );
            }

            model.add_eq(
                category::HOSTING,
                format!("participant {} hosts", p),
                LinearExpr::sum(candidates.hosted_by(p).iter().map(|&id| used[id])),
                1,
            );
        }

        for pair in candidates.pairs() {
            model.add_le(
                category::PAIRWISE,
                format!("pair {}", pair),
                LinearExpr::sum(candidates.containing_pair(pair).iter().map(|&id| used[id])),
                1,
            );
        }

        let mut penalties = Vec::with_capacity(problem.historical_pairs().len());
        for pair in problem.historical_pairs().iter() {
            let penalty = model.new_bool_var();
            let mut expr =
                LinearExpr::sum(candidates.containing_pair(pair).iter().map(|&id| used[id]));
            expr.add_term(penalty, -1);
            model.add_le(
                category::HISTORICAL_PENALTY,
                format!("historical pair {}", pair),
                expr,
                0,
            );
            penalties.push((pair, penalty));
        }
        model.minimize(LinearExpr::sum(penalties.iter().map(|&(_, var)| var)));

        Ok(ScheduleEncoding {
            model,
            triplets: candidates.iter().map(|(_, c)| c.triplet()).collect(),
            used,
            placements,
            penalties,
            slot_count: layout.slot_count(),
        })
    }

    fn validate(problem: &DinnerProblem, candidates: &CandidateSet) -> Result<()> {
        let n = problem.participant_count();
        if candidates.participant_count() != n {
            return Err(DinnerForgeError::DomainModel(format!(
                "candidate set built for {} participants, problem has {}",
                candidates.participant_count(),
                n
            )));
        }
        let slot_count = candidates.layout().slot_count();
        if slot_count != n {
            return Err(DinnerForgeError::DomainModel(format!(
                "layout has {} slots for {} participants",
                slot_count, n
            )));
        }

        for (id, candidate) in candidates.iter() {
            let [h, a, b] = candidate.triplet().members();
            if h >= n || a >= n || b >= n {
                return Err(DinnerForgeError::DomainModel(format!(
                    "candidate {} has a member outside 0..{}",
                    id, n
                )));
            }
            if h == a || h == b || a == b {
                return Err(DinnerForgeError::DomainModel(format!(
                    "candidate {} repeats a member: {}",
                    id,
                    candidate.triplet()
                )));
            }
            if let Some(slot) = candidates.eligible_slots(id).find(|&s| s >= slot_count) {
                return Err(DinnerForgeError::DomainModel(format!(
                    "candidate {} eligible for slot {} outside 0..{}",
                    id, slot, slot_count
                )));
            }
        }

        if let Some(pair) = problem.historical_pairs().iter().find(|p| p.high() >= n) {
            return Err(DinnerForgeError::DomainModel(format!(
                "historical pair {} names a participant outside 0..{}",
                pair, n
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
