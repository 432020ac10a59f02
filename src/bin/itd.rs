//! `itd` command-line entry point.
//!
//! Loads a vibration CSV, decomposes the signal, extracts per-component
//! features, classifies the machine condition and writes the result files.
//!
//! ```text
//! RUST_LOG=debug itd vibration.csv --max-iterations 5 --features-out features.csv
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use log::info;

use itd_decomposition::io::{
    load_signal_path, write_component_csv, write_decomposition_csv, write_features_csv,
};
use itd_decomposition::{
    classify_components, component_features, decompose_with, features::component_label,
    ItdConfig, ItdError, Result, Thresholds, DEFAULT_MAX_ITERATIONS,
};

/// Component exported next to the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComponentChoice {
    /// Terminal residual.
    Last,
    /// One-based component number, as in `PRC_<n>`.
    Number(usize),
}

impl FromStr for ComponentChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("last") {
            return Ok(Self::Last);
        }
        match s.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Self::Number(n)),
            _ => Err(format!("expected `last` or a component number >= 1, got `{s}`")),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "itd", version, about = "Intrinsic Time-scale Decomposition fault detection")]
struct Cli {
    /// CSV file with a time column and a vibration column.
    input: PathBuf,

    /// Maximum number of rotation components.
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Component written with `--component-out`: `last` or `1`, `2`, ...
    #[arg(short, long, default_value = "last")]
    component: ComponentChoice,

    /// Mean threshold of the classifier.
    #[arg(long, default_value_t = Thresholds::default().mean)]
    mean_threshold: f64,

    /// Standard deviation threshold of the classifier.
    #[arg(long, default_value_t = Thresholds::default().std)]
    std_threshold: f64,

    /// Write per-component features here.
    #[arg(long)]
    features_out: Option<PathBuf>,

    /// Write the selected component with its time axis here.
    #[arg(long)]
    component_out: Option<PathBuf>,

    /// Write every component with the time axis here.
    #[arg(long)]
    decomposition_out: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<()> {
    let config = ItdConfig::quick(cli.max_iterations);
    let thresholds = Thresholds::new(cli.mean_threshold, cli.std_threshold);
    thresholds.validate()?;

    let signal = load_signal_path(&cli.input)?;
    info!(
        "loaded {} samples from {} (signal column {:?})",
        signal.len(),
        cli.input.display(),
        signal.signal_column
    );

    let decomposition = decompose_with(&signal.values, &config)?;
    if decomposition.is_low_confidence() {
        println!("note: signal has too few extrema for a reliable decomposition");
    }

    let rows = component_features(&decomposition)?;
    let assessment = classify_components(&rows, &thresholds);

    println!(
        "{} component(s), stopped: {}",
        decomposition.len(),
        decomposition.stop_reason
    );
    for row in &rows {
        println!(
            "  {:<8} mean {:>10.6}  std {:>10.6}  rms {:>10.6}",
            row.label, row.features.mean, row.features.std, row.features.rms
        );
    }

    if let Some(path) = &cli.features_out {
        write_features_csv(File::create(path)?, &rows)?;
        info!("features written to {}", path.display());
    }

    if let Some(path) = &cli.component_out {
        let index = match cli.component {
            ComponentChoice::Last => decomposition.len() - 1,
            ComponentChoice::Number(n) => n - 1,
        };
        let component = decomposition.component(index).ok_or_else(|| {
            ItdError::invalid_input(format!(
                "component {} requested but only {} available",
                index + 1,
                decomposition.len()
            ))
        })?;
        write_component_csv(
            File::create(path)?,
            &signal.time,
            component,
            &component_label(index),
        )?;
        info!("component written to {}", path.display());
    }

    if let Some(path) = &cli.decomposition_out {
        write_decomposition_csv(File::create(path)?, &signal.time, &decomposition)?;
        info!("decomposition written to {}", path.display());
    }

    println!();
    println!("Machine condition: {}", assessment.condition);
    println!("  {}", assessment.condition.advice());
    println!(
        "  max mean {:.4} (threshold {}), max std {:.4} (threshold {})",
        assessment.mean, thresholds.mean, assessment.std, thresholds.std
    );

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
