//! One-sided spectral estimators
//!
//! All metrics are returned at full length N; callers truncate to
//! `frequency_axis(N, dt).len()` themselves.

use std::fmt;

use super::fft::FftEngine;
use crate::error::{Result, WorkbenchError};

/// Default acoustic reference pressure (20 µPa)
pub const DEFAULT_REFERENCE_PRESSURE: f64 = 2e-5;

/// Frequency-domain quantity selected for display/export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralMetric {
    /// sqrt of the one-sided spectral density
    Amplitude,
    /// |X[0]|² at DC, 2|X[k]|² elsewhere
    SpectralPowerDensity,
    /// 10·ln(d²/pref²)
    SoundPressureLevel,
    /// 10·ln(sqrt(d²/pref²))
    SoundAmplitude,
}

impl SpectralMetric {
    pub const ALL: [SpectralMetric; 4] = [
        SpectralMetric::Amplitude,
        SpectralMetric::SpectralPowerDensity,
        SpectralMetric::SoundPressureLevel,
        SpectralMetric::SoundAmplitude,
    ];

    /// Plain spectral analysis menu
    pub const SPECTRAL: [SpectralMetric; 2] = [
        SpectralMetric::Amplitude,
        SpectralMetric::SpectralPowerDensity,
    ];

    /// Acoustic analysis menu (uses the reference pressure)
    pub const SOUND: [SpectralMetric; 2] = [
        SpectralMetric::SoundPressureLevel,
        SpectralMetric::SoundAmplitude,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SpectralMetric::Amplitude => "Amplitude",
            SpectralMetric::SpectralPowerDensity => "Spectral Power Density",
            SpectralMetric::SoundPressureLevel => "Sound Pressure Level",
            SpectralMetric::SoundAmplitude => "Sound Amplitude",
        }
    }

    /// snake_case form used in file names and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            SpectralMetric::Amplitude => "amplitude",
            SpectralMetric::SpectralPowerDensity => "spectral_power_density",
            SpectralMetric::SoundPressureLevel => "sound_pressure_level",
            SpectralMetric::SoundAmplitude => "sound_amplitude",
        }
    }

    /// Accepts either the display name or the slug, case-insensitive
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        let slug = wanted.replace(|c: char| c == '-' || c == ' ', "_");
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted) || m.slug().eq_ignore_ascii_case(&slug))
    }
}

impl fmt::Display for SpectralMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Metric produced by [`SpectrumAnalyzer::analyze`]
    pub metric: SpectralMetric,

    /// Reference pressure for the sound metrics
    pub reference_pressure: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            metric: SpectralMetric::Amplitude,
            reference_pressure: DEFAULT_REFERENCE_PRESSURE,
        }
    }
}

/// One-sided frequency bins f[j] = j / (N·dt) for j = 0 .. floor(N/2)-1
pub fn frequency_axis(n: usize, dt: f64) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(WorkbenchError::invalid_input("signal has no samples"));
    }
    if dt == 0.0 || !dt.is_finite() {
        return Err(WorkbenchError::invalid_input(format!(
            "sample spacing must be finite and non-zero, got {dt}"
        )));
    }

    let span = n as f64 * dt;
    Ok((0..n / 2).map(|j| j as f64 / span).collect())
}

/// Spectrum analyzer with a cached FFT planner
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        validate_reference(config.reference_pressure)?;
        Ok(Self {
            config,
            fft_engine: FftEngine::new(),
        })
    }

    /// Compute the configured metric
    pub fn analyze(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        self.compute(self.config.metric, signal)
    }

    /// Dispatch on `metric`
    pub fn compute(&mut self, metric: SpectralMetric, signal: &[f64]) -> Result<Vec<f64>> {
        match metric {
            SpectralMetric::Amplitude => self.amplitude(signal),
            SpectralMetric::SpectralPowerDensity => self.spectral_density(signal),
            SpectralMetric::SoundPressureLevel => self.sound_pressure_level(signal),
            SpectralMetric::SoundAmplitude => self.sound_amplitude(signal),
        }
    }

    /// One-sided density: DC bin as is, every other bin doubled
    pub fn spectral_density(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let mut density = self.fft_engine.power(signal)?;
        for d in density.iter_mut().skip(1) {
            *d *= 2.0;
        }
        log::debug!("spectral density over {} samples", density.len());
        ensure_finite(SpectralMetric::SpectralPowerDensity, density)
    }

    pub fn amplitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let amplitude = self
            .spectral_density(signal)?
            .into_iter()
            .map(f64::sqrt)
            .collect();
        ensure_finite(SpectralMetric::Amplitude, amplitude)
    }

    /// 10·ln(d²/pref²), natural log rather than log10
    pub fn sound_pressure_level(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let pref_sq = self.config.reference_pressure.powi(2);
        let level = self
            .spectral_density(signal)?
            .into_iter()
            .map(|d| 10.0 * (d.powi(2) / pref_sq).ln())
            .collect();
        ensure_finite(SpectralMetric::SoundPressureLevel, level)
    }

    /// 10·ln(sqrt(d²/pref²)), natural log as above
    pub fn sound_amplitude(&mut self, signal: &[f64]) -> Result<Vec<f64>> {
        let pref_sq = self.config.reference_pressure.powi(2);
        let level = self
            .spectral_density(signal)?
            .into_iter()
            .map(|d| 10.0 * (d.powi(2) / pref_sq).sqrt().ln())
            .collect();
        ensure_finite(SpectralMetric::SoundAmplitude, level)
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) -> Result<()> {
        validate_reference(config.reference_pressure)?;
        self.config = config;
        Ok(())
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

fn validate_reference(pref: f64) -> Result<()> {
    if pref.is_finite() && pref > 0.0 {
        Ok(())
    } else {
        Err(WorkbenchError::invalid_value(
            "reference_pressure",
            format!("must be finite and positive, got {pref}"),
        ))
    }
}

fn ensure_finite(metric: SpectralMetric, values: Vec<f64>) -> Result<Vec<f64>> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(bin) => Err(WorkbenchError::invalid_input(format!(
            "{metric} is not finite at bin {bin} (value {})",
            values[bin]
        ))),
        None => Ok(values),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::fft::direct_dft;
    use std::f64::consts::PI;

    fn analyzer() -> SpectrumAnalyzer {
        SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap()
    }

    fn test_signal() -> Vec<f64> {
        (0..50)
            .map(|n| 1.5 + (0.4 * n as f64).sin() + 0.3 * (1.9 * n as f64).cos())
            .collect()
    }

    #[test]
    fn test_frequency_axis() {
        let freqs = frequency_axis(1024, 1.0 / 48000.0).unwrap();
        assert_eq!(freqs.len(), 512);
        assert_eq!(freqs[0], 0.0);
        assert!(freqs.windows(2).all(|w| w[1] > w[0]));
        assert!((freqs[1] - 48000.0 / 1024.0).abs() < 1e-9);

        // Odd N rounds down
        assert_eq!(frequency_axis(7, 0.5).unwrap().len(), 3);
        assert!(frequency_axis(1, 0.5).unwrap().is_empty());
    }

    #[test]
    fn test_frequency_axis_rejects_degenerate() {
        assert!(frequency_axis(0, 0.1).is_err());
        assert!(frequency_axis(16, 0.0).is_err());
        assert!(frequency_axis(16, f64::NAN).is_err());
    }

    #[test]
    fn test_density_dc_not_doubled() {
        let signal = test_signal();
        let density = analyzer().spectral_density(&signal).unwrap();
        let reference = direct_dft(&signal);

        assert_eq!(density.len(), signal.len());
        assert!((density[0] - reference[0].norm_sqr()).abs() < 1e-6);
        for i in 1..signal.len() {
            let expected = 2.0 * reference[i].norm_sqr();
            assert!((density[i] - expected).abs() < 1e-6 * expected.max(1.0));
        }
    }

    #[test]
    fn test_amplitude_is_sqrt_density() {
        let signal = test_signal();
        let mut analyzer = analyzer();
        let density = analyzer.spectral_density(&signal).unwrap();
        let amplitude = analyzer.amplitude(&signal).unwrap();
        for (a, d) in amplitude.iter().zip(density.iter()) {
            assert!((a - d.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sine_peak_bin() {
        let dt = 1.0 / 1000.0;
        let f0 = 62.5;
        let n = 512;
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * f0 * i as f64 * dt).sin())
            .collect();

        let freqs = frequency_axis(n, dt).unwrap();
        let amplitude = analyzer().amplitude(&signal).unwrap();
        let (peak, _) = amplitude[..freqs.len()]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        let bin_width = 1.0 / (n as f64 * dt);
        assert!((freqs[peak] - f0).abs() <= bin_width);
    }

    #[test]
    fn test_sound_levels_use_natural_log() {
        let signal = test_signal();
        let mut analyzer = analyzer();
        let density = analyzer.spectral_density(&signal).unwrap();
        let spl = analyzer.sound_pressure_level(&signal).unwrap();
        let sa = analyzer.sound_amplitude(&signal).unwrap();
        let pref = DEFAULT_REFERENCE_PRESSURE;

        for i in 0..density.len() {
            let expected_spl = 10.0 * (density[i].powi(2) / pref.powi(2)).ln();
            assert!((spl[i] - expected_spl).abs() < 1e-9);
            // ln(sqrt(v)) is half of ln(v)
            assert!((sa[i] - spl[i] / 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sound_level_rejects_zero_density() {
        // All-zero input has zero density everywhere, ln(0) = -inf
        let err = analyzer().sound_pressure_level(&[0.0; 8]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_empty_signal_rejected() {
        let mut analyzer = analyzer();
        for metric in SpectralMetric::ALL {
            assert!(analyzer.compute(metric, &[]).is_err());
        }
    }

    #[test]
    fn test_reference_pressure_validated() {
        let config = AnalyzerConfig {
            reference_pressure: 0.0,
            ..AnalyzerConfig::default()
        };
        assert!(SpectrumAnalyzer::new(config).is_err());

        let mut analyzer = analyzer();
        let bad = AnalyzerConfig {
            reference_pressure: f64::NAN,
            ..AnalyzerConfig::default()
        };
        assert!(analyzer.update_config(bad).is_err());
        assert_eq!(analyzer.config().reference_pressure, DEFAULT_REFERENCE_PRESSURE);
    }

    #[test]
    fn test_metric_lookup() {
        assert_eq!(
            SpectralMetric::from_name("Spectral Power Density"),
            Some(SpectralMetric::SpectralPowerDensity)
        );
        assert_eq!(
            SpectralMetric::from_name("sound-pressure-level"),
            Some(SpectralMetric::SoundPressureLevel)
        );
        assert_eq!(SpectralMetric::from_name("phase"), None);

        let mut analyzer = analyzer();
        let signal = test_signal();
        assert_eq!(
            analyzer.analyze(&signal).unwrap(),
            analyzer.amplitude(&signal).unwrap()
        );
    }
}
