//! Window function registry for spectral analysis
//!
//! Symmetric windows of length M, the same convention as the classic
//! filter-design tables (endpoints equal, peak of 1.0 at the centre for odd M).

use std::f64::consts::PI;
use std::fmt;

use crate::error::{Result, WorkbenchError};

/// Name the selection lists use for "no windowing"
pub const NO_WINDOW: &str = "None";

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowType {
    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/(M-1))
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    Hamming,

    /// Bartlett (triangular) window with zero endpoints:
    /// w[n] = 1 - |2n/(M-1) - 1|
    Bartlett,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/(M-1)) + 0.08*cos(4πn/(M-1))
    Blackman,
}

impl WindowType {
    /// Every registered window, in menu order
    pub const ALL: [WindowType; 4] = [
        WindowType::Hann,
        WindowType::Hamming,
        WindowType::Bartlett,
        WindowType::Blackman,
    ];

    /// Display name used by the selection lists
    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Hann => "Hanning",
            WindowType::Hamming => "Hamming",
            WindowType::Bartlett => "Bartlett",
            WindowType::Blackman => "Blackman",
        }
    }

    /// Look a window up by name (case-insensitive, `hann` and `hanning` are aliases)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "hann" | "hanning" => Ok(WindowType::Hann),
            "hamming" => Ok(WindowType::Hamming),
            "bartlett" => Ok(WindowType::Bartlett),
            "blackman" => Ok(WindowType::Blackman),
            _ => Err(WorkbenchError::UnknownWindow(name.to_string())),
        }
    }

    /// Parse a selection that may also be the [`NO_WINDOW`] sentinel
    pub fn parse_selection(selection: &str) -> Result<Option<Self>> {
        if selection.trim().eq_ignore_ascii_case(NO_WINDOW) {
            return Ok(None);
        }
        Self::from_name(selection).map(Some)
    }

    /// Selection list entries: the sentinel followed by every registered name
    pub fn selection_names() -> Vec<&'static str> {
        std::iter::once(NO_WINDOW)
            .chain(Self::ALL.iter().map(|w| w.name()))
            .collect()
    }
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `window_type` - Type of window function
/// * `length` - Number of samples (M)
///
/// # Returns
/// Vector of window coefficients w[n] for n = 0..M-1
pub fn generate_window(window_type: WindowType, length: usize) -> Vec<f64> {
    // M-1 is the denominator below; a single-point window is the identity.
    if length <= 1 {
        return vec![1.0; length];
    }

    let denom = (length - 1) as f64;
    let mut window = Vec::with_capacity(length);

    match window_type {
        WindowType::Hann => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / denom;
                window.push(0.5 - 0.5 * angle.cos());
            }
        }

        WindowType::Hamming => {
            for n in 0..length {
                let angle = 2.0 * PI * n as f64 / denom;
                window.push(0.54 - 0.46 * angle.cos());
            }
        }

        WindowType::Bartlett => {
            for n in 0..length {
                window.push(1.0 - (2.0 * n as f64 / denom - 1.0).abs());
            }
        }

        WindowType::Blackman => {
            for n in 0..length {
                let angle1 = 2.0 * PI * n as f64 / denom;
                let angle2 = 4.0 * PI * n as f64 / denom;
                // Rounding can leave the endpoints a hair below zero.
                window.push((0.42 - 0.5 * angle1.cos() + 0.08 * angle2.cos()).max(0.0));
            }
        }
    }

    window
}
