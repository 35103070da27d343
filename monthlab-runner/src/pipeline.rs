//! The end-to-end run: load → filter → aggregate → indicators → window → export.
//!
//! Sequential mode runs each core stage over the whole table. Parallel mode
//! runs the same three stages per ticker on the rayon pool; tickers are
//! independent, and results are collected in ticker order so both modes
//! produce identical output.

use std::path::PathBuf;

use monthlab_core::indicators::apply_indicators;
use monthlab_core::resample::aggregate_ticker;
use monthlab_core::series::{counts_by_ticker, group_by_ticker};
use monthlab_core::window::truncate_series;
use monthlab_core::{
    add_indicators, aggregate, assert_shape, enforce_window, CoreError, DailyBar, MonthlyBar,
    PeriodRule,
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, PipelineConfig};
use crate::export::{write_partitioned_csvs, ExportError};
use crate::loader::{filter_tickers, load_prices, LoadError};
use crate::timing::StageTimer;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Tickers written, in file order.
    pub tickers: Vec<String>,
    /// Total monthly rows written across all files.
    pub rows: usize,
    pub files: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

impl RunSummary {
    pub fn ticker_count(&self) -> usize {
        self.tickers.len()
    }
}

fn process_ticker(
    ticker: &str,
    days: &[DailyBar],
    rule: PeriodRule,
    months: usize,
) -> Result<Vec<MonthlyBar>, CoreError> {
    let mut series = aggregate_ticker(days, rule)?;
    apply_indicators(&mut series);
    truncate_series(ticker, series, months)
}

/// Run the three core stages plus the shape self-check over `daily`.
///
/// Output is sorted by (ticker, date).
pub fn process(
    daily: Vec<DailyBar>,
    rule: PeriodRule,
    months: usize,
    parallel: bool,
) -> Result<Vec<MonthlyBar>, CoreError> {
    let monthly = if parallel {
        let _timer = StageTimer::new("process_parallel");
        let groups: Vec<(String, Vec<DailyBar>)> = group_by_ticker(daily).into_iter().collect();
        let results: Vec<Result<Vec<MonthlyBar>, CoreError>> = groups
            .par_iter()
            .map(|(ticker, days)| process_ticker(ticker, days, rule, months))
            .collect();

        let mut monthly = Vec::new();
        for result in results {
            monthly.extend(result?);
        }
        monthly
    } else {
        let monthly = {
            let _timer = StageTimer::new("aggregate");
            aggregate(daily, rule)?
        };
        let monthly = {
            let _timer = StageTimer::new("indicators");
            add_indicators(monthly)
        };
        let _timer = StageTimer::new("window");
        enforce_window(monthly, months)?
    };

    assert_shape(&monthly, months)?;
    Ok(monthly)
}

/// Execute a full run described by `config`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, RunError> {
    let rule = config.validate()?;

    let daily = {
        let _timer = StageTimer::new("load");
        load_prices(&config.input_csv)?
    };
    let daily = filter_tickers(daily, config.tickers.as_deref());
    info!(
        rows = daily.len(),
        rule = %rule,
        months = config.months,
        parallel = config.parallel,
        "processing daily prices"
    );

    let monthly = process(daily, rule, config.months, config.parallel)?;

    let files = {
        let _timer = StageTimer::new("export");
        write_partitioned_csvs(&monthly, &config.output_dir)?
    };

    let tickers: Vec<String> = counts_by_ticker(&monthly)
        .into_keys()
        .map(String::from)
        .collect();
    info!(
        tickers = tickers.len(),
        files = files.len(),
        output_dir = %config.output_dir.display(),
        "run complete"
    );

    Ok(RunSummary {
        tickers,
        rows: monthly.len(),
        files,
        output_dir: config.output_dir.clone(),
    })
}
