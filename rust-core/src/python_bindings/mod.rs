//! PyO3 bindings for the desktop front end

use pyo3::exceptions::{PyIOError, PyIndexError, PyKeyError, PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;

use crate::error::{ErrorKind, WorkbenchError};

mod signal_bindings;
mod spectrum_bindings;

impl From<WorkbenchError> for PyErr {
    fn from(err: WorkbenchError) -> PyErr {
        let message = err.to_string();
        match err.kind() {
            ErrorKind::Type => PyTypeError::new_err(message),
            ErrorKind::Value | ErrorKind::InvalidInput | ErrorKind::Ingestion => {
                PyValueError::new_err(message)
            }
            ErrorKind::UnknownWindow => PyKeyError::new_err(message),
            ErrorKind::OutOfRange => PyIndexError::new_err(message),
            ErrorKind::Io => PyIOError::new_err(message),
            ErrorKind::Render => PyRuntimeError::new_err(message),
        }
    }
}

/// Python module definition
#[pymodule]
fn fourier_workbench(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<signal_bindings::PySignalStore>()?;

    m.add_function(wrap_pyfunction!(spectrum_bindings::window_names, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::metric_names, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::frequency_axis, m)?)?;

    Ok(())
}
