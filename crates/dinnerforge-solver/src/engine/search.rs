//! Depth-first branch-and-bound worker.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::incumbent::SharedSearch;
use super::propagator::{CompiledModel, SearchState};
use crate::model::SearchBudget;
use crate::statistics::StatisticsCollector;
use crate::termination::{
    BestObjectiveTermination, ExternalTermination, NodeCountTermination, OrTermination,
    SearchProgress, Termination, TimeTermination,
};

/// How a worker's search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WorkerExit {
    /// The whole tree was explored under the shared bound.
    Exhausted,
    /// A solution reached the proven lower bound.
    BoundReached,
    /// A termination fired or another worker finished.
    Stopped,
}

impl WorkerExit {
    pub(crate) fn is_proof(self) -> bool {
        matches!(self, WorkerExit::Exhausted | WorkerExit::BoundReached)
    }
}

#[derive(Debug, Clone, Copy)]
struct Level {
    trail_len: usize,
    var: usize,
    value: bool,
    flipped: bool,
}

pub(crate) struct Worker<'a> {
    id: usize,
    model: &'a CompiledModel,
    shared: &'a SharedSearch,
    stats: &'a StatisticsCollector,
    budget: &'a SearchBudget,
    check_interval: u64,
    nodes: u64,
    conflicts: u64,
    flushed_nodes: u64,
    flushed_conflicts: u64,
    last_progress: Instant,
}

impl<'a> Worker<'a> {
    pub(crate) fn new(
        id: usize,
        model: &'a CompiledModel,
        shared: &'a SharedSearch,
        stats: &'a StatisticsCollector,
        budget: &'a SearchBudget,
        check_interval: u64,
    ) -> Self {
        Worker {
            id,
            model,
            shared,
            stats,
            budget,
            check_interval: check_interval.max(1),
            nodes: 0,
            conflicts: 0,
            flushed_nodes: 0,
            flushed_conflicts: 0,
            last_progress: Instant::now(),
        }
    }

    pub(crate) fn run(mut self) -> WorkerExit {
        let exit = self.search();
        self.flush();
        debug!(
            event = "worker_end",
            worker = self.id,
            exit = ?exit,
            nodes = self.nodes,
            conflicts = self.conflicts,
        );
        match exit {
            WorkerExit::Exhausted | WorkerExit::BoundReached => self.shared.mark_proven(),
            WorkerExit::Stopped => self.shared.request_stop(),
        }
        exit
    }

    fn search(&mut self) -> WorkerExit {
        let budget = self.budget;
        let termination = OrTermination((
            TimeTermination::new(budget.time_limit),
            budget.node_limit.map(NodeCountTermination::new),
            budget.objective_limit.map(BestObjectiveTermination::new),
            budget.terminate.as_deref().map(ExternalTermination::new),
        ));

        // Per-worker tie-break orders; worker seeds differ so the workers
        // explore different parts of the tree first.
        let mut rng = ChaCha8Rng::seed_from_u64(budget.random_seed.wrapping_add(self.id as u64));
        let constraint_rank = shuffled_ranks(self.model.constraint_count(), &mut rng);
        let var_rank = shuffled_ranks(self.model.var_count(), &mut rng);

        let mut state = SearchState::new(self.model);
        let mut levels: Vec<Level> = Vec::new();

        if !state.propagate() {
            self.conflicts += 1;
            return WorkerExit::Exhausted;
        }
        self.shared.raise_lower_bound(state.objective_min());

        let mut local_bound = i64::MAX;
        let mut since_check = self.check_interval;

        loop {
            if self.shared.should_stop() {
                return WorkerExit::Stopped;
            }
            if since_check >= self.check_interval {
                since_check = 0;
                if self.check_termination(&termination) {
                    return WorkerExit::Stopped;
                }
            }

            let best = self.shared.best_objective();
            if best < local_bound {
                local_bound = best;
                state.set_objective_hi(best - 1);
                if !state.propagate() {
                    self.conflicts += 1;
                    if !self.backtrack(&mut state, &mut levels) {
                        return WorkerExit::Exhausted;
                    }
                    continue;
                }
            }

            match state.select_branch(&constraint_rank, &var_rank) {
                Some((var, value)) => {
                    self.nodes += 1;
                    since_check += 1;
                    trace!(event = "branch", worker = self.id, var, value, depth = levels.len());
                    levels.push(Level {
                        trail_len: state.trail_len(),
                        var,
                        value,
                        flipped: false,
                    });
                    state.assign(var, value);
                    if !state.propagate() {
                        self.conflicts += 1;
                        if !self.backtrack(&mut state, &mut levels) {
                            return WorkerExit::Exhausted;
                        }
                    }
                }
                None if state.objective_exceeded() => {
                    self.conflicts += 1;
                    if !self.backtrack(&mut state, &mut levels) {
                        return WorkerExit::Exhausted;
                    }
                }
                None => {
                    let objective = state.objective_fixed();
                    if self.shared.offer(objective, state.values(), self.id) {
                        self.flush();
                        self.stats.record_solution(objective, self.id);
                        info!(
                            event = "new_best",
                            worker = self.id,
                            objective,
                            nodes = self.stats.node_count(),
                            elapsed_ms = self.stats.elapsed().as_millis() as u64,
                        );
                        if objective <= self.shared.lower_bound() {
                            return WorkerExit::BoundReached;
                        }
                    }
                    if self.check_termination(&termination) {
                        return WorkerExit::Stopped;
                    }
                    // The bound update at the top of the loop rejects this
                    // leaf and resumes the search below it.
                }
            }
        }
    }

    /// Undoes decisions until an untried alternative propagates cleanly.
    /// Returns `false` once the tree is exhausted.
    fn backtrack(&mut self, state: &mut SearchState<'_>, levels: &mut Vec<Level>) -> bool {
        while let Some(level) = levels.pop() {
            state.undo_to(level.trail_len);
            if level.flipped {
                continue;
            }
            levels.push(Level {
                value: !level.value,
                flipped: true,
                ..level
            });
            state.assign(level.var, !level.value);
            if state.propagate() {
                return true;
            }
            self.conflicts += 1;
        }
        false
    }

    fn check_termination<T: Termination>(&mut self, termination: &T) -> bool {
        let node_count = self.flush();
        let progress = SearchProgress {
            elapsed: self.stats.elapsed(),
            node_count,
            best_objective: self.shared.best(),
        };

        if self.id == 0 && self.last_progress.elapsed().as_secs() >= 1 {
            self.last_progress = Instant::now();
            let secs = progress.elapsed.as_secs_f64();
            let speed = if secs > 0.0 {
                (node_count as f64 / secs) as u64
            } else {
                0
            };
            info!(
                event = "progress",
                nodes = node_count,
                conflicts = self.stats.conflict_count(),
                speed,
                best_objective = ?progress.best_objective,
            );
        }

        termination.is_terminated(&progress)
    }

    /// Publishes local counters; returns the global node count.
    fn flush(&mut self) -> u64 {
        let total = self.stats.record_nodes(self.nodes - self.flushed_nodes);
        self.stats.record_conflicts(self.conflicts - self.flushed_conflicts);
        self.flushed_nodes = self.nodes;
        self.flushed_conflicts = self.conflicts;
        total
    }
}

fn shuffled_ranks(len: usize, rng: &mut ChaCha8Rng) -> Vec<u32> {
    let mut order: Vec<u32> = (0..len as u32).collect();
    order.shuffle(rng);
    let mut rank = vec![0u32; len];
    for (position, &index) in order.iter().enumerate() {
        rank[index as usize] = position as u32;
    }
    rank
}
