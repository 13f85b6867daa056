//! Python bindings for the window registry and metric menus

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::spectrum::{self, SpectralMetric, WindowType};

/// Window selection entries, starting with the "None" sentinel
#[pyfunction]
pub fn window_names() -> Vec<&'static str> {
    WindowType::selection_names()
}

/// Metric display names
///
/// Args:
///     group: "spectral", "sound" or None for every metric
#[pyfunction]
#[pyo3(signature = (group=None))]
pub fn metric_names(group: Option<&str>) -> PyResult<Vec<&'static str>> {
    let metrics: &[SpectralMetric] = match group {
        None => &SpectralMetric::ALL,
        Some("spectral") => &SpectralMetric::SPECTRAL,
        Some("sound") => &SpectralMetric::SOUND,
        Some(other) => {
            return Err(pyo3::exceptions::PyValueError::new_err(format!(
                "Unknown metric group: {other}"
            )))
        }
    };
    Ok(metrics.iter().map(|m| m.name()).collect())
}

/// One-sided frequency bins for `n` samples spaced `dt` apart
#[pyfunction]
pub fn frequency_axis<'py>(py: Python<'py>, n: usize, dt: f64) -> PyResult<&'py PyArray1<f64>> {
    let freqs = spectrum::frequency_axis(n, dt)?;
    Ok(PyArray1::from_vec(py, freqs))
}
