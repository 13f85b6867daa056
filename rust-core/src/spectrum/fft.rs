//! FFT engine for real-valued sample sequences
//!
//! Produces the full-length complex DFT, X[k] = Σ x[n]·e^(-2πikn/N), unscaled.
//! Plans are cached by the planner so repeated crops of the same length
//! only pay for planning once.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::{Result, WorkbenchError};

/// FFT engine for arbitrary-length real signals
pub struct FftEngine {
    planner: FftPlanner<f64>,

    /// Reusable complex work buffer
    buffer: Vec<Complex64>,
}

impl FftEngine {
    /// Create new FFT engine
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            buffer: Vec::new(),
        }
    }

    /// Compute the full complex spectrum (length N) of `signal`
    ///
    /// Fails with `InvalidInput` for an empty or non-finite signal.
    pub fn dft(&mut self, signal: &[f64]) -> Result<Vec<Complex64>> {
        if signal.is_empty() {
            return Err(WorkbenchError::invalid_input("cannot transform an empty signal"));
        }
        if let Some(i) = signal.iter().position(|v| !v.is_finite()) {
            return Err(WorkbenchError::invalid_input(format!(
                "sample {i} is not finite"
            )));
        }

        let fft = self.planner.plan_fft_forward(signal.len());

        self.buffer.clear();
        self.buffer
            .extend(signal.iter().map(|&v| Complex64::new(v, 0.0)));
        fft.process(&mut self.buffer);

        Ok(self.buffer.clone())
    }

    /// Compute |X[k]|² for every bin
    pub fn power(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        Ok(self.dft(signal)?.iter().map(|c| c.norm_sqr()).collect())
    }
}

impl Default for FftEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct O(N²) evaluation of the DFT
///
/// Slow; used to cross-check the planned transform.
#[cfg(test)]
pub(crate) fn direct_dft(signal: &[f64]) -> Vec<Complex64> {
    let n = signal.len();
    (0..n)
        .map(|k| {
            let mut sum = Complex64::new(0.0, 0.0);
            for (j, &x) in signal.iter().enumerate() {
                let phase = -2.0 * std::f64::consts::PI * (k * j % n) as f64 / n as f64;
                sum += x * Complex64::new(phase.cos(), phase.sin());
            }
            sum
        })
        .collect()
}
