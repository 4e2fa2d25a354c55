//! Dependency graph storage.
//!
//! The graph is a plain container: it records which tasks exist and how they
//! depend on each other, and nothing else. All scheduling logic (including
//! cycle detection) lives in [`crate::solver`]; the graph accepts any shape,
//! cyclic or not.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::Task;

/// A set of tasks and the precedence relation between them.
///
/// The `predecessors` and `successors` maps are kept as exact inverses:
/// `d` is in `predecessors[t]` if and only if `t` is in `successors[d]`.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    /// All known task names mapped to their durations.
    tasks: FxHashMap<String, f64>,
    /// For each task, the tasks it depends on.
    predecessors: FxHashMap<String, FxHashSet<String>>,
    /// For each task, the tasks that depend on it.
    successors: FxHashMap<String, FxHashSet<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task together with the tasks it depends on.
    ///
    /// This is an upsert: re-adding an existing name updates its duration, and
    /// repeated calls for the same task accumulate dependencies (union, never
    /// replacement). Dependencies not previously known are inserted as tasks
    /// themselves; they stay leaves until a later call gives them
    /// dependencies of their own.
    pub fn add_task(&mut self, task: &Task, dependencies: &[Task]) {
        self.tasks.insert(task.name.clone(), task.duration);

        let preds = self.predecessors.entry(task.name.clone()).or_default();
        for dependency in dependencies {
            preds.insert(dependency.name.clone());
        }

        for dependency in dependencies {
            self.tasks
                .insert(dependency.name.clone(), dependency.duration);
            self.successors
                .entry(dependency.name.clone())
                .or_default()
                .insert(task.name.clone());
        }
    }

    /// Number of known tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Whether a task with this name is known to the graph.
    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    /// Duration of a task, if it is known.
    pub fn duration_of(&self, name: &str) -> Option<f64> {
        self.tasks.get(name).copied()
    }

    /// Iterate over all known task names (arbitrary order).
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    /// Tasks that `name` depends on. Empty for unknown or dependency-free tasks.
    pub fn predecessors_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.predecessors
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Tasks that depend on `name`. Empty for unknown tasks and sinks.
    pub fn successors_of(&self, name: &str) -> impl Iterator<Item = &str> {
        self.successors
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }
}
