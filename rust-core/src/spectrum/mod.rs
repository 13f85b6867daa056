//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;
pub mod windowing;
pub mod windows;

pub use analysis::{frequency_axis, AnalyzerConfig, SpectralMetric, SpectrumAnalyzer};
pub use fft::FftEngine;
pub use windowing::{apply_named_window, apply_window, subtract_mean};
pub use windows::{generate_window, WindowType};
