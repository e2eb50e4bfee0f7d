//! Search statistics collection and reporting.
//!
//! Workers share one [`StatisticsCollector`]; counters are atomics so the
//! hot path never takes a lock. Objective improvements are rare and go
//! through a mutex.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Record of an objective improvement event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveImprovement {
    /// Time since the search started when the solution was found.
    pub time_offset: Duration,
    /// Total nodes explored at that point.
    pub node_count: u64,
    /// The new (lower) objective.
    pub objective: i64,
    /// Worker that found it.
    pub worker: usize,
}

/// Complete statistics for a search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total time spent searching.
    pub duration: Duration,
    /// Branching decisions across all workers.
    pub node_count: u64,
    /// Propagation failures across all workers.
    pub conflict_count: u64,
    /// Complete solutions found (each improves on the previous best).
    pub solution_count: u64,
    pub worker_count: usize,
    /// History of objective improvements, oldest first.
    pub objective_history: Vec<ObjectiveImprovement>,
}

impl SearchStatistics {
    /// Returns the best objective achieved (last in history, or None).
    pub fn best_objective(&self) -> Option<i64> {
        self.objective_history.last().map(|i| i.objective)
    }

    /// Nodes per second over the whole run.
    pub fn nodes_per_second(&self) -> u64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            (self.node_count as f64 / secs) as u64
        } else {
            0
        }
    }
}

/// Thread-safe collector for search statistics.
///
/// Call `snapshot()` after the workers have joined to get the final
/// `SearchStatistics`.
#[derive(Debug)]
pub struct StatisticsCollector {
    start_time: Instant,
    worker_count: usize,
    nodes: AtomicU64,
    conflicts: AtomicU64,
    solutions: AtomicU64,
    objective_history: Mutex<Vec<ObjectiveImprovement>>,
}

impl StatisticsCollector {
    /// Creates a new collector; the start time is recorded now.
    pub fn new(worker_count: usize) -> Self {
        Self {
            start_time: Instant::now(),
            worker_count,
            nodes: AtomicU64::new(0),
            conflicts: AtomicU64::new(0),
            solutions: AtomicU64::new(0),
            objective_history: Mutex::new(Vec::new()),
        }
    }

    /// Adds a batch of explored nodes and returns the new total.
    pub fn record_nodes(&self, count: u64) -> u64 {
        self.nodes.fetch_add(count, Ordering::Relaxed) + count
    }

    pub fn record_conflicts(&self, count: u64) {
        self.conflicts.fetch_add(count, Ordering::Relaxed);
    }

    /// Records an improving solution.
    pub fn record_solution(&self, objective: i64, worker: usize) {
        self.solutions.fetch_add(1, Ordering::Relaxed);
        let improvement = ObjectiveImprovement {
            time_offset: self.elapsed(),
            node_count: self.node_count(),
            objective,
            worker,
        };
        if let Ok(mut history) = self.objective_history.lock() {
            history.push(improvement);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn node_count(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    pub fn conflict_count(&self) -> u64 {
        self.conflicts.load(Ordering::Relaxed)
    }

    /// Current statistics.
    pub fn snapshot(&self) -> SearchStatistics {
        let objective_history = self
            .objective_history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_default();
        SearchStatistics {
            duration: self.elapsed(),
            node_count: self.node_count(),
            conflict_count: self.conflict_count(),
            solution_count: self.solutions.load(Ordering::Relaxed),
            worker_count: self.worker_count,
            objective_history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let collector = StatisticsCollector::new(2);
        assert_eq!(collector.record_nodes(10), 10);
        assert_eq!(collector.record_nodes(5), 15);
        collector.record_conflicts(3);
        collector.record_solution(4, 1);
        collector.record_solution(2, 0);

        let stats = collector.snapshot();
        assert_eq!(stats.node_count, 15);
        assert_eq!(stats.conflict_count, 3);
        assert_eq!(stats.solution_count, 2);
        assert_eq!(stats.worker_count, 2);
        assert_eq!(stats.best_objective(), Some(2));
        assert_eq!(stats.objective_history[0].worker, 1);
        assert_eq!(stats.objective_history[1].node_count, 15);
    }

    #[test]
    fn test_concurrent_recording() {
        let collector = StatisticsCollector::new(4);

        rayon::scope(|s| {
            for worker in 0..4 {
                let collector = &collector;
                s.spawn(move |_| {
                    for _ in 0..250 {
                        collector.record_nodes(1);
                        collector.record_conflicts(1);
                    }
                    collector.record_solution(100 - worker as i64, worker);
                });
            }
        });

        let stats = collector.snapshot();
        assert_eq!(stats.node_count, 1000);
        assert_eq!(stats.conflict_count, 1000);
        assert_eq!(stats.solution_count, 4);
        assert_eq!(stats.objective_history.len(), 4);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = SearchStatistics::default();
        assert_eq!(stats.best_objective(), None);
        assert_eq!(stats.nodes_per_second(), 0);
    }
}
