//! bench-average binary
//!
//! Averages per-instance measurement files into a summary CSV.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use bench_average::config::{Config, OutlierTarget};
use bench_average::reporter::{OutputFormat, Reporter};
use bench_average::runner::BatchAverager;
use bench_average::writer::write_summary_file;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "bench-average")]
#[command(
    version,
    about = "Average per-instance benchmark measurements into a summary CSV"
)]
struct Args {
    /// TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the measurement files
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Summary CSV to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Remove IQR outliers before averaging (runtime series by default)
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "runtime")]
    remove_outliers: Option<TargetArg>,

    /// Abort on the first failing instance without writing any output
    #[arg(long)]
    fail_fast: bool,

    /// How the table is printed: console, json, json-pretty or markdown
    #[arg(short, long, default_value = "console")]
    format: OutputFormat,

    /// Print the table without writing the summary CSV
    #[arg(long)]
    no_write: bool,

    /// Instances to aggregate, overriding the configured list
    instances: Vec<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TargetArg {
    Runtime,
    Error,
    Both,
}

impl From<TargetArg> for OutlierTarget {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Runtime => OutlierTarget::Runtime,
            TargetArg::Error => OutlierTarget::Error,
            TargetArg::Both => OutlierTarget::Both,
        }
    }
}

impl Args {
    /// Load the configured file (or defaults) and apply command-line overrides
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if let Some(target) = self.remove_outliers {
            config.outliers.enabled = true;
            config.outliers.target = target.into();
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
        if !self.instances.is_empty() {
            config.instances = self.instances.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(args: &Args) -> Result<bool> {
    let averager = BatchAverager::new(args.resolve_config()?);

    let report = averager.run()?;
    Reporter::new(args.format).report(&report)?;

    if !args.no_write {
        write_summary_file(&averager.config().output_path, &report.rows)?;
    }

    Ok(report.passed())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // stdout carries the table, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
