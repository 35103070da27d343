//! Per-ticker CSV export.
//!
//! One file per ticker, `result_{TICKER}.csv`, with a fixed column order.
//! Absent indicator cells are written as empty fields. Each file is written
//! to a `.tmp` sibling and renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use monthlab_core::series::group_by_ticker;
use monthlab_core::MonthlyBar;
use thiserror::Error;
use tracing::debug;

/// Output columns, in file order.
pub const OUTPUT_COLUMNS: [&str; 12] = [
    "date", "ticker", "open", "high", "low", "close", "sma_10", "sma_20", "ema_10", "ema_20",
    "volume", "adjclose",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: csv::Error },

    #[error("failed to move {path} into place: {source}")]
    Rename { path: PathBuf, source: io::Error },
}

/// Output file for one ticker.
pub fn output_path(output_dir: &Path, ticker: &str) -> PathBuf {
    output_dir.join(format!("result_{ticker}.csv"))
}

fn price(value: f64) -> String {
    value.to_string()
}

fn optional(value: Option<f64>) -> String {
    value.map(price).unwrap_or_default()
}

/// Write one ticker's rows, header first.
pub fn write_ticker_csv<W: io::Write>(writer: W, rows: &[MonthlyBar]) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(OUTPUT_COLUMNS)?;
    for bar in rows {
        wtr.write_record([
            bar.date.format("%Y-%m-%d").to_string(),
            bar.ticker.clone(),
            price(bar.open),
            price(bar.high),
            price(bar.low),
            price(bar.close),
            optional(bar.sma_10),
            optional(bar.sma_20),
            optional(bar.ema_10),
            optional(bar.ema_20),
            bar.volume.to_string(),
            price(bar.adj_close),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Partition `monthly` by ticker and write one file per ticker under
/// `output_dir`, creating the directory if needed. Returns the written
/// paths in ticker order.
pub fn write_partitioned_csvs(
    monthly: &[MonthlyBar],
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let groups = group_by_ticker(monthly.to_vec());
    let mut written = Vec::with_capacity(groups.len());

    for (ticker, rows) in &groups {
        let path = output_path(output_dir, ticker);
        let tmp_path = path.with_extension("csv.tmp");

        let file = fs::File::create(&tmp_path).map_err(|e| ExportError::Write {
            path: tmp_path.clone(),
            source: csv::Error::from(e),
        })?;
        if let Err(source) = write_ticker_csv(file, rows) {
            let _ = fs::remove_file(&tmp_path);
            return Err(ExportError::Write { path, source });
        }

        // Atomic rename
        fs::rename(&tmp_path, &path).map_err(|source| {
            let _ = fs::remove_file(&tmp_path);
            ExportError::Rename {
                path: path.clone(),
                source,
            }
        })?;

        debug!(%ticker, rows = rows.len(), path = %path.display(), "wrote ticker file");
        written.push(path);
    }

    Ok(written)
}
