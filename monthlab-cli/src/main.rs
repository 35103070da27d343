//! Monthlab CLI — turn a daily OHLCV table into per-ticker monthly files.
//!
//! Reads a daily price CSV, resamples every selected ticker to calendar
//! months, attaches SMA/EMA 10 and 20, keeps the trailing window and writes
//! `result_{TICKER}.csv` per ticker.
//!
//! Set `RUST_LOG=debug` for per-stage timings and per-ticker detail.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use monthlab_runner::{run, PipelineConfig, DEFAULT_TICKERS};

#[derive(Parser)]
#[command(
    name = "monthlab",
    about = "Daily → monthly OHLCV with SMA/EMA, one CSV per ticker"
)]
struct Cli {
    /// Path to the input CSV (required unless --config names one).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Folder to store result_{TICKER}.csv.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Comma-separated tickers. Defaults to the built-in list.
    #[arg(long, value_delimiter = ',', conflicts_with = "all_tickers")]
    tickers: Option<Vec<String>>,

    /// Keep every ticker present in the input.
    #[arg(long, default_value_t = false)]
    all_tickers: bool,

    /// Trailing months kept per ticker.
    #[arg(long)]
    months: Option<usize>,

    /// Period rule token ("ME" or its equivalent "M").
    #[arg(long)]
    rule: Option<String>,

    /// Process tickers in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// TOML config file; flags given on the command line override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => {
                let input = self
                    .input
                    .clone()
                    .context("--input is required when no --config is given")?;
                let mut config = PipelineConfig::new(input);
                config.tickers = Some(DEFAULT_TICKERS.iter().map(|t| t.to_string()).collect());
                config
            }
        };

        if let Some(input) = self.input {
            config.input_csv = input;
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(tickers) = self.tickers {
            let tickers: Vec<String> = tickers
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            config.tickers = Some(tickers);
        }
        if self.all_tickers {
            config.tickers = None;
        }
        if let Some(months) = self.months {
            config.months = months;
        }
        if let Some(rule) = self.rule {
            config.resample_rule = rule;
        }
        if self.parallel {
            config.parallel = true;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config()?;
    let summary = run(&config)?;

    println!(
        "Done. Wrote {} files to: {}/",
        summary.ticker_count(),
        summary.output_dir.display()
    );
    Ok(())
}
