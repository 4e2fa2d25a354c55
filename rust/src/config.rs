//! Configuration types for the scheduling system.

use pyo3::prelude::*;

/// Configuration for the ALAP solver.
#[pyclass]
#[derive(Clone, Debug)]
pub struct SolverConfig {
    /// Verbosity level: 0=silent, 1=passes, 2=updates, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Whether tasks with negative durations are rejected before solving.
    #[pyo3(get, set)]
    pub reject_negative_durations: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            reject_negative_durations: true,
        }
    }
}

#[pymethods]
impl SolverConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, reject_negative_durations=None))]
    fn new(verbosity: Option<u8>, reject_negative_durations: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            reject_negative_durations: reject_negative_durations
                .unwrap_or(defaults.reject_negative_durations),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SolverConfig(verbosity={}, reject_negative_durations={})",
            self.verbosity, self.reject_negative_durations
        )
    }
}
