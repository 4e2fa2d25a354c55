//! As-late-as-possible start time solver.
//!
//! Assigns every task the latest start time consistent with its dependents,
//! anchored so that tasks nothing depends on finish exactly at time 0. Start
//! times are found by fixed-point relaxation: each pass recomputes every task
//! from its successors, and a pass that changes nothing means the schedule is
//! final. An acyclic graph stabilizes within one pass per task; a graph that
//! is still changing after that many passes contains a cycle.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::config::SolverConfig;
use crate::graph::DependencyGraph;
use crate::models::ScheduledTask;
use crate::{log_debug, log_passes, log_updates};

/// Errors that can occur while solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Cyclic dependency detected in task graph")]
    CyclicDependency,
    #[error("Task {task:?} has negative duration {duration}")]
    InvalidTask { task: String, duration: f64 },
}

/// Dense integer ID for a task during a solve.
type TaskId = u32;

/// Immutable task name <-> integer mapping for one solve.
///
/// IDs are assigned in lexicographic name order, so a given graph always gets
/// the same index regardless of hash iteration order.
struct TaskIndex {
    names: Vec<String>,
    ids: FxHashMap<String, TaskId>,
}

impl TaskIndex {
    fn from_graph(graph: &DependencyGraph) -> Self {
        let mut names: Vec<String> = graph.task_names().map(str::to_string).collect();
        names.sort();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id as TaskId))
            .collect();
        Self { names, ids }
    }

    fn get_id(&self, name: &str) -> Option<TaskId> {
        self.ids.get(name).copied()
    }

    fn resolve(&self, id: TaskId) -> &str {
        &self.names[id as usize]
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// A computed schedule: the solver's output, owned by the solver's caller.
///
/// Task inputs are never mutated; all derived state lives here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schedule {
    start_times: FxHashMap<String, f64>,
    order: Vec<ScheduledTask>,
}

impl Schedule {
    /// Computed start time for a task, if the task was part of the solve.
    pub fn start_time_of(&self, name: &str) -> Option<f64> {
        self.start_times.get(name).copied()
    }

    /// All tasks ordered by non-decreasing start time (ties by name).
    pub fn order(&self) -> &[ScheduledTask] {
        &self.order
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the schedule has no tasks.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Compare f64 values for sorting, treating incomparable values as equal.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Compute an ALAP schedule for every task in the graph.
///
/// Each task ends up with `start_time = -duration + min(0, min over successor
/// start times)`: sinks finish at 0 and everything upstream starts exactly as
/// late as its dependents allow.
///
/// # Arguments
/// * `graph` - The dependency graph to schedule
/// * `config` - Solver configuration (verbosity, validation)
///
/// # Returns
/// * `Ok(Schedule)` with start times and the time-ordered task sequence
/// * `Err(SolveError::CyclicDependency)` if the graph has a cycle
/// * `Err(SolveError::InvalidTask)` for a negative duration, unless
///   `config.reject_negative_durations` is disabled
pub fn solve(graph: &DependencyGraph, config: &SolverConfig) -> Result<Schedule, SolveError> {
    let index = TaskIndex::from_graph(graph);
    let n = index.len();

    let durations: Vec<f64> = (0..n)
        .map(|i| graph.duration_of(index.resolve(i as TaskId)).unwrap_or(0.0))
        .collect();

    if config.reject_negative_durations {
        for (i, &duration) in durations.iter().enumerate() {
            if duration < 0.0 {
                return Err(SolveError::InvalidTask {
                    task: index.resolve(i as TaskId).to_string(),
                    duration,
                });
            }
        }
    }

    // Successor adjacency in dense IDs.
    let mut successors: Vec<Vec<TaskId>> = vec![Vec::new(); n];
    for (i, succs) in successors.iter_mut().enumerate() {
        for succ in graph.successors_of(index.resolve(i as TaskId)) {
            if let Some(id) = index.get_id(succ) {
                succs.push(id);
            }
        }
    }

    log_debug!(
        config.verbosity,
        "solving {} tasks with a budget of {} passes",
        n,
        n
    );

    // Initialization: every task as if it had no successors.
    let mut start: Vec<f64> = durations.iter().map(|d| -d).collect();

    // Relaxation passes. In-place updates are sound here: start times only
    // ever decrease, and the fixed point is the same whatever the update
    // order, so in-place can converge faster but never to a different result.
    let mut converged = n == 0;
    for pass in 1..=n {
        let mut num_changed = 0usize;
        for i in 0..n {
            let mut horizon = 0.0_f64;
            for &succ in &successors[i] {
                horizon = horizon.min(start[succ as usize]);
            }
            let new_time = -durations[i] + horizon;
            if new_time != start[i] {
                log_updates!(
                    config.verbosity,
                    "  {}: {} -> {}",
                    index.resolve(i as TaskId),
                    start[i],
                    new_time
                );
                start[i] = new_time;
                num_changed += 1;
            }
        }
        log_passes!(
            config.verbosity,
            "pass {}/{}: {} start times changed",
            pass,
            n,
            num_changed
        );
        if num_changed == 0 {
            converged = true;
            break;
        }
    }

    // A pass budget of one per task always suffices for an acyclic graph:
    // each pass extends the settled region one edge further from the sinks.
    // Still changing after n passes means no fixed point exists.
    if !converged {
        log_passes!(
            config.verbosity,
            "no fixed point after {} passes; task graph is cyclic",
            n
        );
        return Err(SolveError::CyclicDependency);
    }

    let mut order: Vec<ScheduledTask> = (0..n)
        .map(|i| ScheduledTask {
            task_id: index.names[i].clone(),
            start_time: start[i],
            end_time: start[i] + durations[i],
            duration: durations[i],
        })
        .collect();
    order.sort_by(|a, b| {
        cmp_f64(a.start_time, b.start_time).then_with(|| a.task_id.cmp(&b.task_id))
    });

    let start_times = index
        .names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), start[i]))
        .collect();

    Ok(Schedule { start_times, order })
}
