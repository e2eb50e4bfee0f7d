//! Boolean linear model and the backend capability.
//!
//! The encoder writes the scheduling rules as linear constraints over 0/1
//! variables. Any search technique that can minimize a linear objective
//! over such a model plugs in through [`SolverBackend`].

use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use dinnerforge_core::Result;

use crate::statistics::SearchStatistics;

/// A 0/1 decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(u32);

impl BoolVar {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BoolVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Weighted sum of boolean variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(BoolVar, i64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the variables, each with coefficient one.
    pub fn sum<I: IntoIterator<Item = BoolVar>>(vars: I) -> Self {
        LinearExpr {
            terms: vars.into_iter().map(|v| (v, 1)).collect(),
        }
    }

    pub fn with_term(mut self, var: BoolVar, coefficient: i64) -> Self {
        self.add_term(var, coefficient);
        self
    }

    pub fn add_term(&mut self, var: BoolVar, coefficient: i64) {
        self.terms.push((var, coefficient));
    }

    pub fn terms(&self) -> &[(BoolVar, i64)] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression under a full assignment.
    ///
    /// Variables outside `values` count as false.
    pub fn evaluate(&self, values: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| values.get(var.index()).copied().unwrap_or(false))
            .map(|(_, coefficient)| coefficient)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Eq,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Eq => "=",
            Relation::Le => "<=",
            Relation::Ge => ">=",
        })
    }
}

/// `expr <relation> rhs`, tagged for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: i64,
    /// Constraint family, e.g. `"slot_coverage"`.
    pub category: &'static str,
    /// Readable name of this instance, e.g. `"slot 4"`.
    pub name: String,
}

impl LinearConstraint {
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        let lhs = self.expr.evaluate(values);
        match self.relation {
            Relation::Eq => lhs == self.rhs,
            Relation::Le => lhs <= self.rhs,
            Relation::Ge => lhs >= self.rhs,
        }
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} terms {} {}",
            self.category,
            self.name,
            self.expr.terms().len(),
            self.relation,
            self.rhs
        )
    }
}

/// Size summary of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub variable_count: usize,
    pub constraint_count: usize,
    pub objective_term_count: usize,
    pub constraints_by_category: BTreeMap<&'static str, usize>,
}

/// Minimization model over boolean variables.
///
/// # Examples
///
/// ```
/// use dinnerforge_solver::{LinearExpr, LinearModel};
///
/// let mut model = LinearModel::new();
/// let a = model.new_bool_var();
/// let b = model.new_bool_var();
/// model.add_eq("choice", "one of a, b", LinearExpr::sum([a, b]), 1);
/// model.minimize(LinearExpr::new().with_term(a, 3).with_term(b, 5));
///
/// assert!(model.is_satisfied_by(&[true, false]));
/// assert!(!model.is_satisfied_by(&[true, true]));
/// assert_eq!(model.objective_value(&[true, false]), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    variable_count: u32,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl LinearModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_bool_var(&mut self) -> BoolVar {
        let var = BoolVar(self.variable_count);
        self.variable_count += 1;
        var
    }

    pub fn add_eq(
        &mut self,
        category: &'static str,
        name: impl Into<String>,
        expr: LinearExpr,
        rhs: i64,
    ) {
        self.add(category, name, expr, Relation::Eq, rhs);
    }

    pub fn add_le(
        &mut self,
        category: &'static str,
        name: impl Into<String>,
        expr: LinearExpr,
        rhs: i64,
    ) {
        self.add(category, name, expr, Relation::Le, rhs);
    }

    pub fn add_ge(
        &mut self,
        category: &'static str,
        name: impl Into<String>,
        expr: LinearExpr,
        rhs: i64,
    ) {
        self.add(category, name, expr, Relation::Ge, rhs);
    }

    fn add(
        &mut self,
        category: &'static str,
        name: impl Into<String>,
        expr: LinearExpr,
        relation: Relation,
        rhs: i64,
    ) {
        self.add_constraint(LinearConstraint {
            expr,
            relation,
            rhs,
            category,
            name: name.into(),
        });
    }

    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    /// Sets the objective to minimize, replacing any earlier one.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count as usize
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Whether a full assignment satisfies every constraint.
    pub fn is_satisfied_by(&self, values: &[bool]) -> bool {
        values.len() == self.variable_count() && self.first_violation(values).is_none()
    }

    /// First constraint the assignment breaks, for diagnostics.
    pub fn first_violation(&self, values: &[bool]) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| !c.is_satisfied_by(values))
    }

    pub fn objective_value(&self, values: &[bool]) -> i64 {
        self.objective.evaluate(values)
    }

    pub fn statistics(&self) -> ModelStatistics {
        let mut by_category = BTreeMap::new();
        for constraint in &self.constraints {
            *by_category.entry(constraint.category).or_insert(0) += 1;
        }
        ModelStatistics {
            variable_count: self.variable_count(),
            constraint_count: self.constraints.len(),
            objective_term_count: self.objective.terms().len(),
            constraints_by_category: by_category,
        }
    }
}

/// How a backend run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Solution found and proven minimal.
    Optimal,
    /// Solution found; the budget ran out before a proof.
    Feasible,
    /// Proven that no solution exists.
    Infeasible,
    /// Budget ran out before any solution was found.
    Unknown,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
        })
    }
}

/// Resources a backend may spend.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    pub time_limit: Duration,
    pub worker_count: usize,
    pub random_seed: u64,
    /// Total search nodes across all workers.
    pub node_limit: Option<u64>,
    /// Stop once an objective at or below this value is found.
    pub objective_limit: Option<i64>,
    pub terminate: Option<Arc<AtomicBool>>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget {
            time_limit: Duration::from_secs(3600),
            worker_count: 1,
            random_seed: 0,
            node_limit: None,
            objective_limit: None,
            terminate: None,
        }
    }
}

impl SearchBudget {
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count.max(1);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = Some(nodes);
        self
    }

    pub fn with_objective_limit(mut self, objective: i64) -> Self {
        self.objective_limit = Some(objective);
        self
    }

    pub fn with_terminate(mut self, flag: Arc<AtomicBool>) -> Self {
        self.terminate = Some(flag);
        self
    }
}

/// What a backend returns.
#[derive(Debug, Clone)]
pub struct BackendResult {
    pub status: SolveStatus,
    /// Full assignment, indexed by [`BoolVar::index`], when a solution exists.
    pub values: Option<Vec<bool>>,
    pub objective: Option<i64>,
    pub statistics: SearchStatistics,
}

/// A search technique able to minimize a [`LinearModel`].
pub trait SolverBackend: Send + Sync + Debug {
    /// Short identifier used in log events.
    fn name(&self) -> &str;

    /// Searches for a minimal assignment within the budget.
    ///
    /// Running out of budget or proving infeasibility is reported through
    /// [`SolveStatus`]; `Err` is reserved for failures of the backend
    /// itself.
    fn solve(&self, model: &LinearModel, budget: &SearchBudget) -> Result<BackendResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_relations() {
        let mut model = LinearModel::new();
        let a = model.new_bool_var();
        let b = model.new_bool_var();
        let c = model.new_bool_var();
        model.add_le("cap", "a + b <= 1", LinearExpr::sum([a, b]), 1);
        model.add_ge("cover", "b + c >= 1", LinearExpr::sum([b, c]), 1);
        model.add_eq(
            "link",
            "a - c = 0",
            LinearExpr::new().with_term(a, 1).with_term(c, -1),
            0,
        );

        assert!(model.is_satisfied_by(&[true, false, true]));
        assert!(model.is_satisfied_by(&[false, true, false]));
        assert!(!model.is_satisfied_by(&[true, true, true]));
        assert_eq!(
            model.first_violation(&[false, false, false]).map(|c| c.category),
            Some("cover")
        );
        assert!(!model.is_satisfied_by(&[true, false]));
    }

    #[test]
    fn test_statistics_by_category() {
        let mut model = LinearModel::new();
        let vars: Vec<BoolVar> = (0..4).map(|_| model.new_bool_var()).collect();
        for (i, pair) in vars.chunks(2).enumerate() {
            model.add_eq("pair", format!("pair {}", i), LinearExpr::sum(pair.to_vec()), 1);
        }
        model.add_le("all", "total", LinearExpr::sum(vars.clone()), 3);
        model.minimize(LinearExpr::sum([vars[0]]));

        let stats = model.statistics();
        assert_eq!(stats.variable_count, 4);
        assert_eq!(stats.constraint_count, 3);
        assert_eq!(stats.objective_term_count, 1);
        assert_eq!(stats.constraints_by_category.get("pair"), Some(&2));
        assert_eq!(stats.constraints_by_category.get("all"), Some(&1));
    }

    #[test]
    fn test_status_has_solution() {
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::Unknown.has_solution());
    }
}
