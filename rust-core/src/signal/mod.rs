//! Sampled time-domain signals and their analysis view
//!
//! Raw samples are immutable after construction. Everything derived from
//! them (cropped view, detrended/windowed samples, spectra) is recomputed from
//! the current view parameters on every read, so nothing can go stale.

pub mod store;
pub mod view;

use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};

use crate::error::{Result, WorkbenchError};
use crate::ingest::RawSamples;
use crate::spectrum::{apply_window, frequency_axis, subtract_mean, SpectrumAnalyzer, WindowType};

pub use store::SignalStore;
pub use view::PlotView;

pub const DEFAULT_XLABEL: &str = "X";
pub const DEFAULT_YLABEL: &str = "Y";
pub const DEFAULT_NAME: &str = "Plot";
pub const FREQUENCY_LABEL: &str = "Frequency [Hz]";

/// Common interface of every signal variant a store can hold
pub trait Signal {
    /// Effective (cropped) x samples
    fn x(&self) -> &[f64];
    /// Effective (cropped) y samples
    fn y(&self) -> &[f64];
    fn xlabel(&self) -> &str;
    fn ylabel(&self) -> &str;
    fn name(&self) -> &str;
    fn xlim(&self) -> (f64, f64);
    /// Human-readable multi-line summary
    fn info(&self) -> String;
    /// Snap the limits to sample values around `[xmin, xmax]`
    fn crop(&mut self, xmin: f64, xmax: f64) -> Result<(usize, usize)>;
    fn update(&mut self, update: SignalUpdate) -> Result<()>;
    fn reset(&mut self);
}

/// Partial edit applied by [`Signal::update`]
///
/// Labels and limits left as `None` keep their current value. `window`
/// is different: leaving it `None` switches windowing off, so callers
/// must repeat the current window to keep it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalUpdate {
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub name: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub window: Option<WindowType>,
    pub subtract_mean: Option<bool>,
}

impl SignalUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xlabel(mut self, xlabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self
    }

    pub fn ylabel(mut self, ylabel: impl Into<String>) -> Self {
        self.ylabel = Some(ylabel.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn xlim(mut self, xmin: f64, xmax: f64) -> Self {
        self.xlim = Some((xmin, xmax));
        self
    }

    pub fn window(mut self, window: Option<WindowType>) -> Self {
        self.window = window;
        self
    }

    pub fn subtract_mean(mut self, enabled: bool) -> Self {
        self.subtract_mean = Some(enabled);
        self
    }
}

/// Single-channel signal sampled on a uniform, strictly increasing axis
#[derive(Debug, Clone)]
pub struct SampledSignal {
    x: Vec<f64>,
    y: Vec<f64>,
    source: PathBuf,
    name: String,
    xlabel: String,
    ylabel: String,
    xlim: (f64, f64),
    window: Option<WindowType>,
    subtract_mean: bool,
}

impl SampledSignal {
    /// Build a signal from raw samples
    ///
    /// Requires equal lengths, at least two finite samples and a strictly
    /// increasing x axis. Limits default to the full axis.
    pub fn new(x: Vec<f64>, y: Vec<f64>, source: impl Into<PathBuf>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(WorkbenchError::invalid_input(format!(
                "x has {} samples but y has {}",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(WorkbenchError::invalid_input(format!(
                "at least two samples are required, got {}",
                x.len()
            )));
        }
        if let Some(i) = x.iter().chain(y.iter()).position(|v| !v.is_finite()) {
            return Err(WorkbenchError::invalid_input(format!(
                "sample {} is not finite",
                i % x.len()
            )));
        }
        if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(WorkbenchError::invalid_input(format!(
                "x must be strictly increasing (x[{}] = {}, x[{}] = {})",
                i,
                x[i],
                i + 1,
                x[i + 1]
            )));
        }

        let xlim = (x[0], x[x.len() - 1]);
        Ok(Self {
            x,
            y,
            source: source.into(),
            name: DEFAULT_NAME.to_string(),
            xlabel: DEFAULT_XLABEL.to_string(),
            ylabel: DEFAULT_YLABEL.to_string(),
            xlim,
            window: None,
            subtract_mean: false,
        })
    }

    pub fn from_raw(raw: RawSamples) -> Result<Self> {
        Self::new(raw.x, raw.y, raw.source)
    }

    /// Sample spacing, taken from the first two raw samples
    pub fn dt(&self) -> f64 {
        self.x[1] - self.x[0]
    }

    /// Number of samples in the effective view
    pub fn len(&self) -> usize {
        self.view_range().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn window(&self) -> Option<WindowType> {
        self.window
    }

    pub fn subtracts_mean(&self) -> bool {
        self.subtract_mean
    }

    pub fn set_xlabel(&mut self, xlabel: impl Into<String>) {
        self.xlabel = xlabel.into();
    }

    pub fn set_ylabel(&mut self, ylabel: impl Into<String>) {
        self.ylabel = ylabel.into();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Set the analysed range without snapping it to samples
    pub fn set_xlim(&mut self, xmin: f64, xmax: f64) -> Result<()> {
        validate_limits(xmin, xmax)?;
        self.xlim = (xmin, xmax);
        Ok(())
    }

    pub fn set_window(&mut self, window: Option<WindowType>) {
        self.window = window;
    }

    pub fn set_subtract_mean(&mut self, enabled: bool) {
        self.subtract_mean = enabled;
    }

    /// `(iMin, iMax)` for the given limits
    ///
    /// iMin is the last sample at or below `xmin` (0 if none), iMax the first
    /// sample at or above `xmax` (last index if none).
    pub fn crop_indices(&self, xmin: f64, xmax: f64) -> (usize, usize) {
        let below = self.x.partition_point(|&v| v <= xmin);
        let i_min = below.saturating_sub(1);

        let i_max = self.x.partition_point(|&v| v < xmax);
        let i_max = if i_max == self.x.len() {
            self.x.len() - 1
        } else {
            i_max
        };

        (i_min, i_max)
    }

    /// Half-open index range of the effective view; iMax itself is excluded
    fn view_range(&self) -> Range<usize> {
        let (i_min, i_max) = self.crop_indices(self.xlim.0, self.xlim.1);
        i_min..i_max.max(i_min)
    }

    /// Cropped y, then mean removal, then windowing, as enabled
    pub fn processed_y(&self) -> Vec<f64> {
        let mut y = self.y().to_vec();
        if self.subtract_mean {
            y = subtract_mean(&y);
        }
        if let Some(window) = self.window {
            y = apply_window(&y, window);
        }
        y
    }

    /// Time-domain view handed to the plotting/export layer
    pub fn input_view(&self) -> PlotView {
        PlotView {
            x: self.x().to_vec(),
            y: self.processed_y(),
            xlabel: self.xlabel.clone(),
            ylabel: self.ylabel.clone(),
            title: self.name.clone(),
            xlim: Some(self.xlim),
        }
    }

    /// One-sided spectrum of the processed view for the analyzer's metric
    pub fn spectrum_view(&self, analyzer: &mut SpectrumAnalyzer) -> Result<PlotView> {
        let samples = self.processed_y();
        let frequencies = frequency_axis(samples.len(), self.dt())?;
        let metric = analyzer.config().metric;

        let mut values = analyzer.analyze(&samples)?;
        values.truncate(frequencies.len());
        log::debug!(
            "{} of '{}': {} samples -> {} bins",
            metric,
            self.name,
            samples.len(),
            frequencies.len()
        );

        Ok(PlotView {
            x: frequencies,
            y: values,
            xlabel: FREQUENCY_LABEL.to_string(),
            ylabel: format!("{} fft({})", metric, self.ylabel),
            title: format!("{} {}", metric, self.name),
            xlim: None,
        })
    }
}

fn validate_limits(xmin: f64, xmax: f64) -> Result<()> {
    if !xmin.is_finite() || !xmax.is_finite() {
        return Err(WorkbenchError::invalid_value(
            "xlim",
            format!("bounds must be finite numbers, got ({xmin}, {xmax})"),
        ));
    }
    if xmin > xmax {
        return Err(WorkbenchError::invalid_value(
            "xlim",
            format!("xmin {xmin} is greater than xmax {xmax}"),
        ));
    }
    Ok(())
}

/// Empty strings mean "not supplied"
fn non_empty(label: Option<String>) -> Option<String> {
    label.filter(|s| !s.is_empty())
}

impl Signal for SampledSignal {
    fn x(&self) -> &[f64] {
        &self.x[self.view_range()]
    }

    fn y(&self) -> &[f64] {
        &self.y[self.view_range()]
    }

    fn xlabel(&self) -> &str {
        &self.xlabel
    }

    fn ylabel(&self) -> &str {
        &self.ylabel
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    fn info(&self) -> String {
        let x = self.x();
        let interval = match (x.first(), x.last()) {
            (Some(first), Some(last)) => format!("{first} ... {last}"),
            _ => "empty".to_string(),
        };
        let window = self.window.map_or("None", |w| w.name());

        format!(
            "Input Signal Name: {}\n\
             \tInput file: {}\n\
             \t{}: step = {} Interval: {}\n\
             \tInterval boundaries: xmin = {}, xmax = {}\n\
             \tWindow: {}, subtract mean: {}\n",
            self.name,
            self.source.display(),
            self.xlabel,
            self.dt(),
            interval,
            self.xlim.0,
            self.xlim.1,
            window,
            self.subtract_mean,
        )
    }

    fn crop(&mut self, xmin: f64, xmax: f64) -> Result<(usize, usize)> {
        validate_limits(xmin, xmax)?;
        let (i_min, i_max) = self.crop_indices(xmin, xmax);
        self.xlim = (self.x[i_min], self.x[i_max]);
        log::debug!(
            "cropped '{}' to [{}, {}] -> indices ({}, {})",
            self.name,
            self.xlim.0,
            self.xlim.1,
            i_min,
            i_max
        );
        Ok((i_min, i_max))
    }

    fn update(&mut self, update: SignalUpdate) -> Result<()> {
        // Validate before touching anything so a failed update changes nothing
        if let Some((xmin, xmax)) = update.xlim {
            validate_limits(xmin, xmax)?;
        }

        if let Some(xlabel) = non_empty(update.xlabel) {
            self.xlabel = xlabel;
        }
        if let Some(ylabel) = non_empty(update.ylabel) {
            self.ylabel = ylabel;
        }
        if let Some(name) = non_empty(update.name) {
            self.name = name;
        }
        if let Some(xlim) = update.xlim {
            self.xlim = xlim;
        }
        self.window = update.window;
        if let Some(enabled) = update.subtract_mean {
            self.subtract_mean = enabled;
        }
        Ok(())
    }

    /// Restores labels, name and limits; window and mean removal are kept
    fn reset(&mut self) {
        self.xlabel = DEFAULT_XLABEL.to_string();
        self.ylabel = DEFAULT_YLABEL.to_string();
        self.name = DEFAULT_NAME.to_string();
        self.xlim = (self.x[0], self.x[self.x.len() - 1]);
    }
}

impl fmt::Display for SampledSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::spectrum::AnalyzerConfig;
    use std::f64::consts::PI;

    fn ramp(n: usize) -> SampledSignal {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..n).map(|i| 10.0 + i as f64).collect();
        SampledSignal::new(x, y, "ramp.csv").unwrap()
    }

    #[test]
    fn test_construction_defaults() {
        let signal = ramp(5);
        assert_eq!(signal.name(), "Plot");
        assert_eq!(signal.xlabel(), "X");
        assert_eq!(signal.ylabel(), "Y");
        assert_eq!(signal.xlim(), (0.0, 4.0));
        assert_eq!(signal.window(), None);
        assert!(!signal.subtracts_mean());
        assert_eq!(signal.dt(), 1.0);
        assert_eq!(signal.source(), Path::new("ramp.csv"));
    }

    #[test]
    fn test_construction_rejects_bad_samples() {
        let bad = [
            (vec![0.0, 1.0, 2.0], vec![1.0, 2.0]),
            (vec![0.0], vec![1.0]),
            (vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]),
            (vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0]),
            (vec![0.0, 1.0], vec![f64::NAN, 2.0]),
        ];
        for (x, y) in bad {
            let err = SampledSignal::new(x, y, "bad.csv").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    #[test]
    fn test_view_excludes_upper_index() {
        let mut signal = ramp(5);
        signal.set_xlim(1.0, 3.0).unwrap();
        assert_eq!(signal.crop_indices(1.0, 3.0), (1, 3));
        assert_eq!(signal.x(), &[1.0, 2.0]);
        assert_eq!(signal.y(), &[11.0, 12.0]);
    }

    #[test]
    fn test_default_view_drops_last_sample() {
        let signal = ramp(5);
        assert_eq!(signal.x(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(signal.len(), 4);
    }

    #[test]
    fn test_view_limits_outside_axis() {
        let mut signal = ramp(5);

        // Below every sample: iMin falls back to 0
        signal.set_xlim(-10.0, 2.5).unwrap();
        assert_eq!(signal.x(), &[0.0, 1.0, 2.0]);

        // Above every sample: iMax falls back to the last index
        signal.set_xlim(1.5, 100.0).unwrap();
        assert_eq!(signal.x(), &[1.0, 2.0, 3.0]);

        // Entirely left of the axis: empty view
        signal.set_xlim(-5.0, -1.0).unwrap();
        assert!(signal.is_empty());
    }

    #[test]
    fn test_view_is_contiguous_within_limits() {
        let signal_len = 40;
        let mut signal = ramp(signal_len);
        for (a, b) in [(3.2, 17.9), (0.0, 39.0), (12.0, 12.5), (5.0, 6.0)] {
            signal.set_xlim(a, b).unwrap();
            let x = signal.x();
            assert!(x.windows(2).all(|w| w[1] - w[0] == 1.0));
            // iMin may sit below xmin when xmin falls between samples
            assert!(x.iter().all(|&v| v < b));
            if let Some(&first) = x.first() {
                assert!(first <= a && a - first < 1.0);
            }
        }
    }

    #[test]
    fn test_crop_snaps_limits() {
        let mut signal = ramp(5);
        let indices = signal.crop(0.5, 3.5).unwrap();
        assert_eq!(indices, (0, 4));
        assert_eq!(signal.xlim(), (0.0, 4.0));

        let indices = signal.crop(1.0, 3.0).unwrap();
        assert_eq!(indices, (1, 3));
        assert_eq!(signal.xlim(), (1.0, 3.0));
        assert_eq!(signal.x(), &[1.0, 2.0]);
    }

    #[test]
    fn test_crop_rejects_invalid_limits() {
        let mut signal = ramp(5);
        assert_eq!(signal.crop(3.0, 1.0).unwrap_err().kind(), ErrorKind::Value);
        assert_eq!(signal.crop(f64::NAN, 1.0).unwrap_err().kind(), ErrorKind::Value);
        assert_eq!(signal.xlim(), (0.0, 4.0));
    }

    #[test]
    fn test_update_overwrites_supplied_fields() {
        let mut signal = ramp(5);
        signal
            .update(
                SignalUpdate::new()
                    .xlabel("Time [s]")
                    .ylabel("Pressure [Pa]")
                    .name("Inlet")
                    .xlim(1.0, 3.0)
                    .window(Some(WindowType::Hann))
                    .subtract_mean(true),
            )
            .unwrap();

        assert_eq!(signal.xlabel(), "Time [s]");
        assert_eq!(signal.ylabel(), "Pressure [Pa]");
        assert_eq!(signal.name(), "Inlet");
        assert_eq!(signal.xlim(), (1.0, 3.0));
        assert_eq!(signal.window(), Some(WindowType::Hann));
        assert!(signal.subtracts_mean());

        // Labels are kept, empty strings count as absent
        signal.update(SignalUpdate::new().xlabel("")).unwrap();
        assert_eq!(signal.xlabel(), "Time [s]");
        assert_eq!(signal.name(), "Inlet");
        assert!(signal.subtracts_mean());
    }

    #[test]
    fn test_update_without_window_clears_it() {
        let mut signal = ramp(5);
        signal
            .update(SignalUpdate::new().window(Some(WindowType::Blackman)))
            .unwrap();
        assert_eq!(signal.window(), Some(WindowType::Blackman));

        signal.update(SignalUpdate::new().name("renamed")).unwrap();
        assert_eq!(signal.window(), None);
    }

    #[test]
    fn test_update_subtract_mean_is_symmetric() {
        let mut signal = ramp(5);
        signal.update(SignalUpdate::new().subtract_mean(true)).unwrap();
        signal.update(SignalUpdate::new()).unwrap();
        assert!(signal.subtracts_mean());
        signal.update(SignalUpdate::new().subtract_mean(false)).unwrap();
        assert!(!signal.subtracts_mean());
    }

    #[test]
    fn test_failed_update_changes_nothing() {
        let mut signal = ramp(5);
        signal.set_window(Some(WindowType::Hann));
        let err = signal
            .update(SignalUpdate::new().name("new").xlim(4.0, 1.0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        assert_eq!(signal.name(), "Plot");
        assert_eq!(signal.window(), Some(WindowType::Hann));
    }

    #[test]
    fn test_reset_keeps_processing_flags() {
        let mut signal = ramp(5);
        signal
            .update(
                SignalUpdate::new()
                    .name("Inlet")
                    .xlabel("t")
                    .ylabel("p")
                    .window(Some(WindowType::Hamming))
                    .subtract_mean(true),
            )
            .unwrap();
        signal.crop(1.0, 3.0).unwrap();

        signal.reset();
        assert_eq!(signal.name(), "Plot");
        assert_eq!(signal.xlabel(), "X");
        assert_eq!(signal.ylabel(), "Y");
        assert_eq!(signal.xlim(), (0.0, 4.0));
        assert_eq!(signal.window(), Some(WindowType::Hamming));
        assert!(signal.subtracts_mean());
    }

    #[test]
    fn test_processed_y_order() {
        let mut signal = ramp(6);
        assert_eq!(signal.processed_y(), signal.y().to_vec());

        signal.set_subtract_mean(true);
        let centered = signal.processed_y();
        assert_eq!(centered, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);

        signal.set_window(Some(WindowType::Bartlett));
        let windowed = signal.processed_y();
        assert_eq!(windowed, apply_window(&centered, WindowType::Bartlett));

        // Dropping the window again yields the plain detrended crop
        signal.update(SignalUpdate::new().window(None)).unwrap();
        assert_eq!(signal.processed_y(), centered);
    }

    #[test]
    fn test_input_view() {
        let mut signal = ramp(5);
        signal.update(SignalUpdate::new().name("Inlet")).unwrap();
        let view = signal.input_view();
        assert_eq!(view.x, vec![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(view.y, vec![10.0, 11.0, 12.0, 13.0]);
        assert_eq!(view.title, "Inlet");
        assert_eq!(view.xlim, Some((0.0, 4.0)));
    }

    #[test]
    fn test_spectrum_view_truncates_to_axis() {
        let dt = 0.01;
        let n = 201;
        let x: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let y: Vec<f64> = x.iter().map(|t| (2.0 * PI * 10.0 * t).sin()).collect();
        let mut signal = SampledSignal::new(x, y, "sine.csv").unwrap();
        signal.update(SignalUpdate::new().ylabel("p")).unwrap();

        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let view = signal.spectrum_view(&mut analyzer).unwrap();

        // 200 effective samples (last one excluded) -> 100 bins
        assert_eq!(view.x.len(), 100);
        assert_eq!(view.y.len(), 100);
        assert_eq!(view.xlabel, "Frequency [Hz]");
        assert_eq!(view.ylabel, "Amplitude fft(p)");

        let (peak, _) = view
            .y
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();
        assert!((view.x[peak] - 10.0).abs() <= 0.5);
    }

    #[test]
    fn test_spectrum_view_of_empty_crop_fails() {
        let mut signal = ramp(5);
        signal.set_xlim(-5.0, -1.0).unwrap();
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let err = signal.spectrum_view(&mut analyzer).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_info_mentions_source_and_limits() {
        let signal = ramp(5);
        let info = signal.info();
        assert!(info.starts_with("Input Signal Name: Plot\n"));
        assert!(info.contains("Input file: ramp.csv"));
        assert!(info.contains("step = 1 Interval: 0 ... 3"));
        assert!(info.contains("xmin = 0, xmax = 4"));
        assert_eq!(signal.to_string(), "Plot");
    }
}
