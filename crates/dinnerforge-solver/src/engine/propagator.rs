//! Compiled constraints and the trail-based search state.

use std::collections::VecDeque;

use dinnerforge_core::{DinnerForgeError, Result};

use crate::model::{LinearExpr, LinearModel, Relation};

const NEG_INF: i64 = i64::MIN / 4;
const POS_INF: i64 = i64::MAX / 4;

const UNASSIGNED: i8 = -1;

/// `lo <= sum(coef * var) <= hi` with merged, non-zero terms.
#[derive(Debug, Clone)]
pub(crate) struct CompiledConstraint {
    terms: Vec<(usize, i64)>,
    lo: i64,
    hi: i64,
    max_abs: i64,
}

/// A [`LinearModel`] in the shape the search needs: one bound pair per
/// constraint and an occurrence list per variable. The objective is the
/// last constraint; its upper bound tightens as solutions are found.
#[derive(Debug, Clone)]
pub(crate) struct CompiledModel {
    var_count: usize,
    constraints: Vec<CompiledConstraint>,
    occurrences: Vec<Vec<(usize, i64)>>,
    objective: usize,
}

impl CompiledModel {
    pub(crate) fn compile(model: &LinearModel) -> Result<Self> {
        let var_count = model.variable_count();
        let mut constraints = Vec::with_capacity(model.constraints().len() + 1);

        for constraint in model.constraints() {
            let (lo, hi) = match constraint.relation {
                Relation::Eq => (constraint.rhs, constraint.rhs),
                Relation::Le => (NEG_INF, constraint.rhs),
                Relation::Ge => (constraint.rhs, POS_INF),
            };
            let terms = merge_terms(&constraint.expr, var_count).map_err(|var| {
                DinnerForgeError::Solver(format!(
                    "constraint {} uses variable {} outside 0..{}",
                    constraint, var, var_count
                ))
            })?;
            constraints.push(CompiledConstraint::new(terms, lo, hi));
        }

        let objective_terms = merge_terms(model.objective(), var_count).map_err(|var| {
            DinnerForgeError::Solver(format!(
                "objective uses variable {} outside 0..{}",
                var, var_count
            ))
        })?;
        let objective = constraints.len();
        constraints.push(CompiledConstraint::new(objective_terms, NEG_INF, POS_INF));

        let mut occurrences = vec![Vec::new(); var_count];
        for (ci, constraint) in constraints.iter().enumerate() {
            for &(var, coef) in &constraint.terms {
                occurrences[var].push((ci, coef));
            }
        }

        Ok(CompiledModel {
            var_count,
            constraints,
            occurrences,
            objective,
        })
    }

    pub(crate) fn var_count(&self) -> usize {
        self.var_count
    }

    pub(crate) fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Smallest objective value any assignment can reach.
    pub(crate) fn objective_floor(&self) -> i64 {
        self.constraints[self.objective]
            .terms
            .iter()
            .map(|&(_, coef)| coef.min(0))
            .sum()
    }
}

impl CompiledConstraint {
    fn new(terms: Vec<(usize, i64)>, lo: i64, hi: i64) -> Self {
        let max_abs = terms.iter().map(|&(_, c)| c.abs()).max().unwrap_or(0);
        CompiledConstraint {
            terms,
            lo,
            hi,
            max_abs,
        }
    }
}

/// Sorts terms by variable, sums repeated variables and drops zero
/// coefficients. Returns the offending variable index when one is out of
/// range.
fn merge_terms(
    expr: &LinearExpr,
    var_count: usize,
) -> std::result::Result<Vec<(usize, i64)>, usize> {
    let mut terms: Vec<(usize, i64)> = Vec::with_capacity(expr.terms().len());
    for &(var, coef) in expr.terms() {
        let index = var.index();
        if index >= var_count {
            return Err(index);
        }
        terms.push((index, coef));
    }
    terms.sort_unstable_by_key(|&(var, _)| var);

    let mut merged: Vec<(usize, i64)> = Vec::with_capacity(terms.len());
    for (var, coef) in terms {
        match merged.last_mut() {
            Some((last, sum)) if *last == var => *sum += coef,
            _ => merged.push((var, coef)),
        }
    }
    merged.retain(|&(_, coef)| coef != 0);
    Ok(merged)
}

/// Partial assignment with incremental bounds for every constraint.
///
/// For constraint `c`, `fixed[c]` sums the coefficients of variables set
/// true; `pos_free[c]` / `neg_free[c]` sum the positive / negative
/// coefficients of unassigned variables. The reachable range of the sum is
/// therefore `fixed + neg_free ..= fixed + pos_free`.
#[derive(Debug)]
pub(crate) struct SearchState<'m> {
    model: &'m CompiledModel,
    values: Vec<i8>,
    fixed: Vec<i64>,
    pos_free: Vec<i64>,
    neg_free: Vec<i64>,
    unassigned: Vec<u32>,
    unassigned_neg: Vec<u32>,
    objective_hi: i64,
    trail: Vec<usize>,
    queue: VecDeque<usize>,
    queued: Vec<bool>,
}

impl<'m> SearchState<'m> {
    /// Fresh state with every constraint queued for propagation.
    pub(crate) fn new(model: &'m CompiledModel) -> Self {
        let count = model.constraints.len();
        let mut state = SearchState {
            model,
            values: vec![UNASSIGNED; model.var_count],
            fixed: vec![0; count],
            pos_free: vec![0; count],
            neg_free: vec![0; count],
            unassigned: vec![0; count],
            unassigned_neg: vec![0; count],
            objective_hi: POS_INF,
            trail: Vec::with_capacity(model.var_count),
            queue: (0..count).collect(),
            queued: vec![true; count],
        };
        for (ci, constraint) in model.constraints.iter().enumerate() {
            for &(_, coef) in &constraint.terms {
                state.unassigned[ci] += 1;
                if coef > 0 {
                    state.pos_free[ci] += coef;
                } else {
                    state.neg_free[ci] += coef;
                    state.unassigned_neg[ci] += 1;
                }
            }
        }
        state
    }

    #[inline]
    fn lo(&self, ci: usize) -> i64 {
        self.model.constraints[ci].lo
    }

    #[inline]
    fn hi(&self, ci: usize) -> i64 {
        if ci == self.model.objective {
            self.objective_hi
        } else {
            self.model.constraints[ci].hi
        }
    }

    #[inline]
    fn min_sum(&self, ci: usize) -> i64 {
        self.fixed[ci] + self.neg_free[ci]
    }

    #[inline]
    fn max_sum(&self, ci: usize) -> i64 {
        self.fixed[ci] + self.pos_free[ci]
    }

    pub(crate) fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Lowest objective reachable from the current partial assignment.
    pub(crate) fn objective_min(&self) -> i64 {
        self.min_sum(self.model.objective)
    }

    /// Objective of the variables set so far; exact once all are assigned.
    pub(crate) fn objective_fixed(&self) -> i64 {
        self.fixed[self.model.objective]
    }

    /// Only solutions with an objective at or below `hi` remain acceptable.
    pub(crate) fn set_objective_hi(&mut self, hi: i64) {
        if hi < self.objective_hi {
            self.objective_hi = hi;
            self.enqueue(self.model.objective);
        }
    }

    pub(crate) fn values(&self) -> Vec<bool> {
        self.values.iter().map(|&v| v == 1).collect()
    }

    fn enqueue(&mut self, ci: usize) {
        if !self.queued[ci] {
            self.queued[ci] = true;
            self.queue.push_back(ci);
        }
    }

    fn clear_queue(&mut self) {
        while let Some(ci) = self.queue.pop_front() {
            self.queued[ci] = false;
        }
    }

    pub(crate) fn assign(&mut self, var: usize, value: bool) {
        debug_assert_eq!(self.values[var], UNASSIGNED);
        self.values[var] = i8::from(value);
        self.trail.push(var);
        let model = self.model;
        for &(ci, coef) in &model.occurrences[var] {
            self.unassigned[ci] -= 1;
            if coef > 0 {
                self.pos_free[ci] -= coef;
            } else {
                self.neg_free[ci] -= coef;
                self.unassigned_neg[ci] -= 1;
            }
            if value {
                self.fixed[ci] += coef;
            }
            self.enqueue(ci);
        }
    }

    /// Undoes assignments until the trail has `len` entries and queues the
    /// objective again when a bound is set.
    pub(crate) fn undo_to(&mut self, len: usize) {
        self.clear_queue();
        let model = self.model;
        while self.trail.len() > len {
            let Some(var) = self.trail.pop() else { break };
            let value = self.values[var] == 1;
            for &(ci, coef) in &model.occurrences[var] {
                self.unassigned[ci] += 1;
                if coef > 0 {
                    self.pos_free[ci] += coef;
                } else {
                    self.neg_free[ci] += coef;
                    self.unassigned_neg[ci] += 1;
                }
                if value {
                    self.fixed[ci] -= coef;
                }
            }
            self.values[var] = UNASSIGNED;
        }
        // The bound may have tightened below the restored level.
        if self.objective_hi < POS_INF {
            self.enqueue(self.model.objective);
        }
    }

    /// Whether the objective of the assigned variables exceeds the bound.
    pub(crate) fn objective_exceeded(&self) -> bool {
        self.objective_min() > self.objective_hi
    }

    /// Bound propagation to a fixpoint. Returns `false` on conflict.
    pub(crate) fn propagate(&mut self) -> bool {
        let model = self.model;
        while let Some(ci) = self.queue.pop_front() {
            self.queued[ci] = false;
            let (lo, hi) = (self.lo(ci), self.hi(ci));
            if self.min_sum(ci) > hi || self.max_sum(ci) < lo {
                self.clear_queue();
                return false;
            }
            if self.unassigned[ci] == 0 {
                continue;
            }
            let constraint = &model.constraints[ci];
            if hi - self.min_sum(ci) >= constraint.max_abs
                && self.max_sum(ci) - lo >= constraint.max_abs
            {
                continue;
            }
            for &(var, coef) in &constraint.terms {
                if self.values[var] != UNASSIGNED {
                    continue;
                }
                let (min, max) = (self.min_sum(ci), self.max_sum(ci));
                let forced = if coef > 0 {
                    if min + coef > hi {
                        Some(false)
                    } else if max - coef < lo {
                        Some(true)
                    } else {
                        None
                    }
                } else if max + coef < lo {
                    Some(false)
                } else if min - coef > hi {
                    Some(true)
                } else {
                    None
                };
                if let Some(value) = forced {
                    self.assign(var, value);
                }
            }
        }
        true
    }

    /// Next decision: the variable to set and the value to try first.
    ///
    /// Prefers an unmet cover constraint (only positive unassigned terms,
    /// lower bound not reached) with the fewest unassigned terms and sets
    /// one of its variables true. Without such a constraint, any unassigned
    /// variable is set false. `None` means the assignment is complete.
    pub(crate) fn select_branch(
        &self,
        constraint_rank: &[u32],
        var_rank: &[u32],
    ) -> Option<(usize, bool)> {
        let mut best: Option<(u32, u32, usize)> = None;
        for ci in 0..self.model.constraints.len() {
            let free = self.unassigned[ci];
            if free == 0 || self.unassigned_neg[ci] != 0 || self.min_sum(ci) >= self.lo(ci) {
                continue;
            }
            let key = (free, constraint_rank[ci], ci);
            if best.map_or(true, |b| key < b) {
                best = Some(key);
            }
        }

        if let Some((_, _, ci)) = best {
            return self.model.constraints[ci]
                .terms
                .iter()
                .map(|&(var, _)| var)
                .filter(|&var| self.values[var] == UNASSIGNED)
                .min_by_key(|&var| var_rank[var])
                .map(|var| (var, true));
        }

        self.values
            .iter()
            .position(|&v| v == UNASSIGNED)
            .map(|var| (var, false))
    }
}
