// Command-line front end: load a two-column file, crop/window it, export the spectrum

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use fourier_workbench::export::{export_analysis, ExportConfig};
use fourier_workbench::ingest;
use fourier_workbench::spectrum::analysis::DEFAULT_REFERENCE_PRESSURE;
use fourier_workbench::{
    AnalyzerConfig, SampledSignal, Signal, SignalUpdate, SpectralMetric, SpectrumAnalyzer,
    WindowType,
};

/// Frequency analysis of sampled signals
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file (two-column CSV, or a spreadsheet read from its first sheet)
    input: PathBuf,

    /// Lower bound of the analysed range (snapped to a sample)
    #[arg(long)]
    xmin: Option<f64>,

    /// Upper bound of the analysed range (snapped to a sample)
    #[arg(long)]
    xmax: Option<f64>,

    /// Window function: hann, hamming, bartlett, blackman or none
    #[arg(short, long, default_value = "none")]
    window: String,

    /// Remove the mean before windowing
    #[arg(long)]
    subtract_mean: bool,

    /// Metric: amplitude, spectral_power_density, sound_pressure_level, sound_amplitude
    #[arg(short, long, default_value = "amplitude")]
    metric: String,

    /// Reference pressure for the sound metrics
    #[arg(long, default_value_t = DEFAULT_REFERENCE_PRESSURE)]
    pref: f64,

    /// Signal name
    #[arg(long)]
    name: Option<String>,

    /// X axis label
    #[arg(long)]
    xlabel: Option<String>,

    /// Y axis label
    #[arg(long)]
    ylabel: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Analysis label used in output file names (defaults to the signal name)
    #[arg(short, long, default_value = "")]
    label: String,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let window = WindowType::parse_selection(&args.window)?;
    let metric = SpectralMetric::from_name(&args.metric)
        .with_context(|| format!("unknown metric '{}'", args.metric))?;

    let raw = ingest::load(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    let mut signal = SampledSignal::from_raw(raw)?;

    signal.update(SignalUpdate {
        xlabel: args.xlabel,
        ylabel: args.ylabel,
        name: args.name,
        xlim: None,
        window,
        subtract_mean: Some(args.subtract_mean),
    })?;

    if args.xmin.is_some() || args.xmax.is_some() {
        let (xmin, xmax) = signal.xlim();
        let (i_min, i_max) = signal.crop(args.xmin.unwrap_or(xmin), args.xmax.unwrap_or(xmax))?;
        log::info!("cropped to samples {i_min}..{i_max}");
    }
    print!("{}", signal.info());

    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        metric,
        reference_pressure: args.pref,
    })?;
    let config = ExportConfig {
        directory: args.out,
        label: args.label,
        ..ExportConfig::default()
    };

    let files = export_analysis(&signal, &mut analyzer, &config)?;
    println!("{}", files.input_csv.display());
    println!("{}", files.spectrum_csv.display());
    for png in [files.input_png, files.spectrum_png].into_iter().flatten() {
        println!("{}", png.display());
    }

    Ok(())
}
