//! Time-domain preprocessing applied before the transform
//!
//! The fixed order is crop → subtract mean → window; the helpers here are
//! the last two steps and know nothing about cropping.

use super::windows::{generate_window, WindowType};
use crate::error::Result;

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal, `signal[i] * w[i]`
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Apply a window looked up by registry name
///
/// Fails with `UnknownWindow` when the name is not registered.
pub fn apply_named_window(signal: &[f64], window_name: &str) -> Result<Vec<f64>> {
    let window_type = WindowType::from_name(window_name)?;
    Ok(apply_window(signal, window_type))
}

/// Remove the arithmetic mean from every sample
pub fn subtract_mean(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    signal.iter().map(|&s| s - mean).collect()
}
