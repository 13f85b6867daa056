//! Python bindings for the signal store
//!
//! Signals are addressed by their position in the store, the same way the
//! front end's list view addresses them.

use std::path::PathBuf;

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyString;

use crate::error::WorkbenchError;
use crate::export::{export_analysis, ExportConfig};
use crate::ingest;
use crate::signal::{SampledSignal, Signal, SignalStore, SignalUpdate};
use crate::spectrum::{AnalyzerConfig, SpectralMetric, SpectrumAnalyzer, WindowType};

type ArrayPair<'py> = (&'py PyArray1<f64>, &'py PyArray1<f64>);

/// Ordered working set of signals exposed to Python
#[pyclass(name = "SignalStore")]
pub struct PySignalStore {
    store: SignalStore,
}

#[pymethods]
impl PySignalStore {
    #[new]
    fn new() -> Self {
        Self {
            store: SignalStore::new(),
        }
    }

    /// Load a two-column CSV file and append it
    ///
    /// Returns:
    ///     Position of the new signal
    fn load_csv(&mut self, path: PathBuf) -> PyResult<usize> {
        let raw = ingest::load(&path)?;
        let signal = SampledSignal::from_raw(raw)?;
        Ok(self.store.add(signal))
    }

    /// Append a signal built from numpy arrays
    ///
    /// Args:
    ///     x: Strictly increasing, uniformly spaced axis
    ///     y: Samples, same length as x
    ///     source: Provenance string (usually the file path)
    #[pyo3(signature = (x, y, source=String::new()))]
    fn add(
        &mut self,
        x: PyReadonlyArray1<f64>,
        y: PyReadonlyArray1<f64>,
        source: String,
    ) -> PyResult<usize> {
        let x = x.as_array().iter().copied().collect();
        let y = y.as_array().iter().copied().collect();
        let signal = SampledSignal::new(x, y, source)?;
        Ok(self.store.add(signal))
    }

    /// Remove the signal at `index`; returns False when the index is invalid
    fn delete(&mut self, index: usize) -> bool {
        self.store.delete(index).is_ok()
    }

    /// Remove every signal
    fn reset(&mut self) {
        self.store.reset();
    }

    fn __len__(&self) -> usize {
        self.store.len()
    }

    fn names(&self) -> Vec<String> {
        self.store.names().into_iter().map(String::from).collect()
    }

    fn info(&self, index: usize) -> PyResult<String> {
        Ok(self.store.get(index)?.info())
    }

    fn xlim(&self, index: usize) -> PyResult<(f64, f64)> {
        Ok(self.store.get(index)?.xlim())
    }

    /// Apply a partial edit
    ///
    /// Omitting `window` switches windowing off; pass the current name to keep it.
    #[pyo3(signature = (index, xlabel=None, ylabel=None, name=None, xlim=None, window=None, subtract_mean=None))]
    #[allow(clippy::too_many_arguments)]
    fn update(
        &mut self,
        index: usize,
        xlabel: Option<&PyAny>,
        ylabel: Option<&PyAny>,
        name: Option<&PyAny>,
        xlim: Option<&PyAny>,
        window: Option<&str>,
        subtract_mean: Option<bool>,
    ) -> PyResult<()> {
        let update = SignalUpdate {
            xlabel: extract_label("xlabel", xlabel)?,
            ylabel: extract_label("ylabel", ylabel)?,
            name: extract_label("name", name)?,
            xlim: xlim.map(extract_limits).transpose()?,
            window: match window {
                Some(selection) => WindowType::parse_selection(selection)?,
                None => None,
            },
            subtract_mean,
        };
        self.store.get_mut(index)?.update(update)?;
        Ok(())
    }

    /// Crop to `[xmin, xmax]`, snapping the limits to samples
    fn crop(&mut self, index: usize, xmin: f64, xmax: f64) -> PyResult<(usize, usize)> {
        Ok(self.store.get_mut(index)?.crop(xmin, xmax)?)
    }

    /// Restore default labels and the full range
    fn reset_signal(&mut self, index: usize) -> PyResult<()> {
        self.store.get_mut(index)?.reset();
        Ok(())
    }

    /// Effective x and processed y of the signal at `index`
    fn input_view<'py>(&self, py: Python<'py>, index: usize) -> PyResult<ArrayPair<'py>> {
        let view = self.store.get(index)?.input_view();
        Ok((PyArray1::from_vec(py, view.x), PyArray1::from_vec(py, view.y)))
    }

    /// Frequency axis and metric values of the signal at `index`
    #[pyo3(signature = (index, metric="Amplitude", pref=2e-5))]
    fn spectrum<'py>(
        &self,
        py: Python<'py>,
        index: usize,
        metric: &str,
        pref: f64,
    ) -> PyResult<ArrayPair<'py>> {
        let mut analyzer = analyzer_for(metric, pref)?;
        let view = self.store.get(index)?.spectrum_view(&mut analyzer)?;
        Ok((PyArray1::from_vec(py, view.x), PyArray1::from_vec(py, view.y)))
    }

    /// Write CSV (and PNG, when rendering is built in) files for the signal
    ///
    /// Returns:
    ///     Paths of the files written
    #[pyo3(signature = (index, directory, label="", metric="Amplitude", pref=2e-5))]
    fn export(
        &self,
        index: usize,
        directory: PathBuf,
        label: &str,
        metric: &str,
        pref: f64,
    ) -> PyResult<Vec<PathBuf>> {
        let mut analyzer = analyzer_for(metric, pref)?;
        let config = ExportConfig {
            directory,
            label: label.to_string(),
            ..ExportConfig::default()
        };
        let files = export_analysis(self.store.get(index)?, &mut analyzer, &config)?;
        Ok([Some(files.input_csv), Some(files.spectrum_csv), files.input_png, files.spectrum_png]
            .into_iter()
            .flatten()
            .collect())
    }
}

fn analyzer_for(metric: &str, pref: f64) -> Result<SpectrumAnalyzer, WorkbenchError> {
    let metric = SpectralMetric::from_name(metric).ok_or_else(|| WorkbenchError::InvalidValue {
        field: "metric",
        reason: format!("unknown metric '{metric}'"),
    })?;
    SpectrumAnalyzer::new(AnalyzerConfig {
        metric,
        reference_pressure: pref,
    })
}

fn extract_label(field: &'static str, value: Option<&PyAny>) -> Result<Option<String>, WorkbenchError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if !value.is_instance_of::<PyString>() {
        return Err(WorkbenchError::InvalidType {
            field,
            expected: "str",
        });
    }
    Ok(Some(value.to_string()))
}

fn extract_limits(value: &PyAny) -> Result<(f64, f64), WorkbenchError> {
    let not_a_pair = || WorkbenchError::InvalidType {
        field: "xlim",
        expected: "a pair of numbers",
    };
    let bounds: Vec<&PyAny> = value
        .iter()
        .map_err(|_| not_a_pair())?
        .collect::<PyResult<_>>()
        .map_err(|_| not_a_pair())?;
    let [low, high] = bounds.as_slice() else {
        return Err(not_a_pair());
    };

    let number = |bound: &PyAny| {
        bound.extract::<f64>().map_err(|_| WorkbenchError::InvalidValue {
            field: "xlim",
            reason: format!("{bound} is not a number"),
        })
    };
    Ok((number(*low)?, number(*high)?))
}
