//! Fourier Workbench - signal model and spectral analysis core
//! 
//! Loads two-column sampled signals, crops and windows them, and computes
//! one-sided spectral estimates for plotting and export. Optional Python
//! bindings expose the same model to a desktop front end.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod error;
pub mod export;
pub mod ingest;
pub mod signal;
pub mod spectrum;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{ErrorKind, WorkbenchError};
pub use signal::{PlotView, SampledSignal, Signal, SignalStore, SignalUpdate};
pub use spectrum::{AnalyzerConfig, SpectralMetric, SpectrumAnalyzer, WindowType};
