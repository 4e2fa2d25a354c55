//! Rust implementation of the Lapse scheduler data types and algorithms.
//!
//! Lapse computes as-late-as-possible start times for tasks connected by
//! dependency constraints: every task starts at the latest moment consistent
//! with its dependents, anchored so the final tasks finish at time 0. The
//! algorithm modules ([`graph`], [`solver`]) are pure Rust; this module adds
//! the Python boundary.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;
use std::collections::HashMap;

mod config;
pub mod graph;
pub mod logging;
mod models;
pub mod solver;

pub use config::SolverConfig;
pub use graph::DependencyGraph;
pub use models::{ScheduledTask, Task};
pub use solver::{solve, Schedule, SolveError};

/// Scheduler for tasks with dependencies (PyO3 facade).
///
/// Tasks are added incrementally with their dependencies; `compute_schedule`
/// then materializes start times for the whole graph. The schedule is
/// recomputed from scratch on every call; a solve that fails leaves no
/// partial schedule behind.
#[pyclass]
#[derive(Debug, Default)]
pub struct Scheduler {
    graph: DependencyGraph,
    config: SolverConfig,
    schedule: Option<Schedule>,
}

#[pymethods]
impl Scheduler {
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<SolverConfig>) -> Self {
        Self {
            graph: DependencyGraph::new(),
            config: config.unwrap_or_default(),
            schedule: None,
        }
    }

    /// Add a task with given dependencies to the scheduler.
    ///
    /// Dependencies that have not been added before become tasks of their
    /// own; repeated calls for the same task accumulate dependencies.
    #[pyo3(signature = (task, dependencies=None))]
    fn add_task(&mut self, task: Task, dependencies: Option<Vec<Task>>) {
        self.graph.add_task(&task, &dependencies.unwrap_or_default());
    }

    /// Compute a schedule for the tasks in the scheduler.
    ///
    /// # Raises
    /// * ValueError if the graph contains a cycle or a task is invalid
    fn compute_schedule(&mut self) -> PyResult<()> {
        self.schedule = None;
        match solve(&self.graph, &self.config) {
            Ok(schedule) => {
                self.schedule = Some(schedule);
                Ok(())
            }
            Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
        }
    }

    /// Return the scheduled tasks in order of increasing start time, or None
    /// if no schedule has been computed yet.
    fn get_schedule(&self) -> Option<Vec<ScheduledTask>> {
        self.schedule.as_ref().map(|s| s.order().to_vec())
    }

    /// Computed start time for a single task, or None if unknown/unsolved.
    fn start_time_of(&self, name: &str) -> Option<f64> {
        self.schedule.as_ref().and_then(|s| s.start_time_of(name))
    }

    /// Number of tasks known to the scheduler.
    fn __len__(&self) -> usize {
        self.graph.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Scheduler(tasks={}, solved={})",
            self.graph.len(),
            self.schedule.is_some()
        )
    }
}

/// Solve a whole task set in one call.
///
/// `dependencies` maps a task name to the names of the tasks it depends on.
/// A dependency name with no entry in `tasks` enters the graph as a
/// zero-duration leaf.
///
/// # Arguments
/// * `tasks` - The tasks to schedule
/// * `dependencies` - Map of task name to dependency names
/// * `config` - Optional solver configuration
///
/// # Returns
/// * Scheduled tasks in order of increasing start time
///
/// # Raises
/// * ValueError if the graph contains a cycle or a task is invalid
#[pyfunction]
#[pyo3(signature = (tasks, dependencies, config=None))]
fn solve_schedule(
    tasks: Vec<Task>,
    dependencies: HashMap<String, Vec<String>>,
    config: Option<SolverConfig>,
) -> PyResult<Vec<ScheduledTask>> {
    let mut graph = DependencyGraph::new();
    for task in &tasks {
        graph.add_task(task, &[]);
    }
    for (name, deps) in &dependencies {
        let task = Task {
            name: name.clone(),
            duration: graph.duration_of(name).unwrap_or(0.0),
        };
        let dep_tasks: Vec<Task> = deps
            .iter()
            .map(|dep| Task {
                name: dep.clone(),
                duration: graph.duration_of(dep).unwrap_or(0.0),
            })
            .collect();
        graph.add_task(&task, &dep_tasks);
    }

    match solve(&graph, &config.unwrap_or_default()) {
        Ok(schedule) => Ok(schedule.order().to_vec()),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The lapse.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Task>()?;
    m.add_class::<ScheduledTask>()?;

    // Config types
    m.add_class::<SolverConfig>()?;

    // Scheduler
    m.add_class::<Scheduler>()?;
    m.add_function(wrap_pyfunction!(solve_schedule, m)?)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(name: &str, duration: f64) -> Task {
        Task {
            name: name.to_string(),
            duration,
        }
    }

    #[test]
    fn test_scheduler_lifecycle() {
        let mut scheduler = Scheduler::new(None);
        assert!(scheduler.get_schedule().is_none());

        scheduler.add_task(make_task("b", 3.0), Some(vec![make_task("a", 2.0)]));
        scheduler.compute_schedule().unwrap();

        let order = scheduler.get_schedule().unwrap();
        assert_eq!(order.len(), 2);
        assert_eq!(order[0].task_id, "a");
        assert_eq!(order[1].task_id, "b");
        assert_eq!(scheduler.start_time_of("a"), Some(-5.0));
        assert_eq!(scheduler.start_time_of("b"), Some(-3.0));
    }

    #[test]
    fn test_failed_solve_leaves_no_schedule() {
        let mut scheduler = Scheduler::new(None);
        scheduler.add_task(make_task("a", 1.0), Some(vec![make_task("a", 1.0)]));

        assert!(scheduler.compute_schedule().is_err());
        assert!(scheduler.get_schedule().is_none());
        assert_eq!(scheduler.start_time_of("a"), None);
    }

    #[test]
    fn test_failed_solve_clears_previous_schedule() {
        let mut scheduler = Scheduler::new(None);
        scheduler.add_task(make_task("a", 1.0), None);
        scheduler.compute_schedule().unwrap();
        assert!(scheduler.get_schedule().is_some());

        // Introduce a cycle and recompute: the old schedule must not survive.
        scheduler.add_task(make_task("a", 1.0), Some(vec![make_task("b", 1.0)]));
        scheduler.add_task(make_task("b", 1.0), Some(vec![make_task("a", 1.0)]));
        assert!(scheduler.compute_schedule().is_err());
        assert!(scheduler.get_schedule().is_none());
    }

    #[test]
    fn test_recompute_overwrites() {
        let mut scheduler = Scheduler::new(None);
        scheduler.add_task(make_task("a", 1.0), None);
        scheduler.compute_schedule().unwrap();
        assert_eq!(scheduler.start_time_of("a"), Some(-1.0));

        // A new dependent pulls "a" earlier on the next solve.
        scheduler.add_task(make_task("b", 2.0), Some(vec![make_task("a", 1.0)]));
        scheduler.compute_schedule().unwrap();
        assert_eq!(scheduler.start_time_of("a"), Some(-3.0));
        assert_eq!(scheduler.start_time_of("b"), Some(-2.0));
    }
}
