//! Core data types for the scheduling system.

use pyo3::prelude::*;

/// A task to be scheduled.
///
/// The name is the task's identity: two tasks with the same name are the same
/// task as far as the dependency graph is concerned. The duration is expressed
/// in whatever unit the caller uses consistently; start times come out in the
/// same unit.
#[pyclass]
#[derive(Clone, Debug)]
pub struct Task {
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: f64,
}

#[pymethods]
impl Task {
    #[new]
    #[pyo3(signature = (name, duration=0.0))]
    fn new(name: String, duration: f64) -> Self {
        Self { name, duration }
    }

    fn __repr__(&self) -> String {
        format!("Task(name={:?}, duration={})", self.name, self.duration)
    }
}

/// A task with its computed start and end times.
///
/// Times are relative offsets: the latest-finishing task ends at 0, so starts
/// and ends are never positive. A task with `end_time == 0.0` is a sink.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledTask {
    #[pyo3(get, set)]
    pub task_id: String,
    #[pyo3(get, set)]
    pub start_time: f64,
    #[pyo3(get, set)]
    pub end_time: f64,
    #[pyo3(get, set)]
    pub duration: f64,
}

#[pymethods]
impl ScheduledTask {
    #[new]
    fn new(task_id: String, start_time: f64, end_time: f64, duration: f64) -> Self {
        Self {
            task_id,
            start_time,
            end_time,
            duration,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(task_id={:?}, start={}, end={})",
            self.task_id, self.start_time, self.end_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_repr() {
        let task = Task {
            name: "preheat_oven".to_string(),
            duration: 15.0,
        };
        assert_eq!(task.__repr__(), "Task(name=\"preheat_oven\", duration=15)");
    }

    #[test]
    fn test_scheduled_task_end_is_start_plus_duration() {
        let scheduled = ScheduledTask {
            task_id: "bake".to_string(),
            start_time: -40.0,
            end_time: 0.0,
            duration: 40.0,
        };
        assert!((scheduled.start_time + scheduled.duration - scheduled.end_time).abs() < 1e-9);
    }
}
