//! Export of analysis views as two-column CSV tables and PNG plots
//!
//! Each analysis produces one file pair for the time-domain input view and
//! one for the selected spectral metric.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, WorkbenchError};
use crate::signal::{PlotView, SampledSignal, Signal};
use crate::spectrum::SpectrumAnalyzer;

/// Where and under which label an analysis is written
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output directory, created if missing
    pub directory: PathBuf,

    /// Analysis label; falls back to the signal name when empty
    pub label: String,

    /// Plot image size in pixels
    pub image_size: (u32, u32),
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            label: String::new(),
            image_size: (900, 400),
        }
    }
}

/// Paths written by [`export_analysis`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub input_csv: PathBuf,
    pub spectrum_csv: PathBuf,
    /// Only present when built with the `render` feature
    pub input_png: Option<PathBuf>,
    pub spectrum_png: Option<PathBuf>,
}

/// Write `xs`/`ys` as `col1,col2` rows
pub fn write_csv(path: impl AsRef<Path>, xs: &[f64], ys: &[f64]) -> Result<()> {
    if xs.len() != ys.len() {
        return Err(WorkbenchError::invalid_input(format!(
            "column lengths differ: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }

    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    writeln!(writer, "col1,col2")?;
    for (x, y) in xs.iter().zip(ys.iter()) {
        writeln!(writer, "{x},{y}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the input view and the analyzer's metric view of `signal`
///
/// Both views are computed, checked and rendered before anything touches
/// the disk, so a failing analysis leaves no partial output behind.
pub fn export_analysis(
    signal: &SampledSignal,
    analyzer: &mut SpectrumAnalyzer,
    config: &ExportConfig,
) -> Result<ExportedFiles> {
    let input = signal.input_view();
    let spectrum = signal.spectrum_view(analyzer)?;
    let metric = analyzer.config().metric;
    for view in [&input, &spectrum] {
        if view.is_empty() {
            return Err(WorkbenchError::invalid_input(format!(
                "'{}' has no samples to export",
                view.title
            )));
        }
    }

    let input_png = render_view(&input, config)?;
    let spectrum_png = render_view(&spectrum, config)?;

    fs::create_dir_all(&config.directory)?;
    let stem = signal
        .source()
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("signal");
    let label = if config.label.trim().is_empty() {
        signal.name()
    } else {
        config.label.as_str()
    };
    let base = format!("{}_{}", sanitize(stem), sanitize(label));

    let input_base = format!("{base}_input");
    let spectrum_base = format!("{base}_{}", metric.slug());

    let input_csv = config.directory.join(format!("{input_base}.csv"));
    let spectrum_csv = config.directory.join(format!("{spectrum_base}.csv"));
    write_csv(&input_csv, &input.x, &input.y)?;
    write_csv(&spectrum_csv, &spectrum.x, &spectrum.y)?;

    let input_png = write_png(&input_base, input_png, config)?;
    let spectrum_png = write_png(&spectrum_base, spectrum_png, config)?;

    log::info!(
        "exported '{}' ({}) to {}",
        signal.name(),
        metric,
        config.directory.display()
    );

    Ok(ExportedFiles {
        input_csv,
        spectrum_csv,
        input_png,
        spectrum_png,
    })
}

#[cfg(feature = "render")]
fn render_view(view: &PlotView, config: &ExportConfig) -> Result<Option<Vec<u8>>> {
    let style = crate::render::PlotStyle::sized(config.image_size.0, config.image_size.1);
    crate::render::render_png(view, &style).map(Some)
}

#[cfg(not(feature = "render"))]
fn render_view(view: &PlotView, _config: &ExportConfig) -> Result<Option<Vec<u8>>> {
    log::debug!("plot rendering disabled, no image for '{}'", view.title);
    Ok(None)
}

fn write_png(base: &str, png: Option<Vec<u8>>, config: &ExportConfig) -> Result<Option<PathBuf>> {
    let Some(png) = png else {
        return Ok(None);
    };
    let path = config.directory.join(format!("{base}.png"));
    fs::write(&path, png)?;
    Ok(Some(path))
}

/// Keep file names portable: path separators and whitespace become '_'
fn sanitize(part: &str) -> String {
    part.trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                '_'
            } else {
                c
            }
        })
        .collect()
}
