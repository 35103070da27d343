//! Price table loading and the ticker allow-list.
//!
//! The loader owns every input check the core does not: required columns,
//! numeric parsing, finite prices and non-negative volume. Dates are parsed
//! with the core's parser so malformed dates surface as
//! `CoreError::MalformedDate` with ticker and row context. The result is
//! sorted by (ticker, date).

use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use monthlab_core::series::sort_by_ticker_date;
use monthlab_core::{CoreError, DailyBar, DailyRecord};
use thiserror::Error;
use tracing::{debug, warn};

/// Columns every input table must carry (any order, extras ignored).
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "date", "volume", "open", "high", "low", "close", "adjclose", "ticker",
];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open { path: PathBuf, source: csv::Error },

    #[error("failed to read header: {0}")]
    Header(csv::Error),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row}: {source}")]
    Record { row: usize, source: csv::Error },

    #[error("row {row}: ticker '{ticker}' has invalid {column} value {value}")]
    InvalidValue {
        row: usize,
        ticker: String,
        column: &'static str,
        value: f64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Load the daily price table at `path`.
pub fn load_prices(path: &Path) -> Result<Vec<DailyBar>, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError::Open {
        path: path.to_path_buf(),
        source: csv::Error::from(e),
    })?;
    let bars = read_prices(file)?;
    debug!(path = %path.display(), rows = bars.len(), "loaded daily prices");
    Ok(bars)
}

/// Read a daily price table from any CSV source.
pub fn read_prices<R: io::Read>(source: R) -> Result<Vec<DailyBar>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(LoadError::Header)?;
    let present: HashSet<&str> = headers.iter().collect();
    let missing: BTreeSet<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.contains(column))
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(
            missing.into_iter().map(String::from).collect(),
        ));
    }

    let mut bars = Vec::new();
    for (i, result) in reader.deserialize::<DailyRecord>().enumerate() {
        let row = i + 1;
        let record = result.map_err(|source| LoadError::Record { row, source })?;
        check_values(&record, row)?;
        bars.push(record.into_bar(row)?);
    }

    sort_by_ticker_date(&mut bars);
    Ok(bars)
}

fn check_values(record: &DailyRecord, row: usize) -> Result<(), LoadError> {
    let prices = [
        ("open", record.open),
        ("high", record.high),
        ("low", record.low),
        ("close", record.close),
        ("adjclose", record.adj_close),
    ];
    let invalid = |column: &'static str, value: f64| LoadError::InvalidValue {
        row,
        ticker: record.ticker.clone(),
        column,
        value,
    };

    if let Some(&(column, value)) = prices.iter().find(|(_, v)| !v.is_finite()) {
        return Err(invalid(column, value));
    }
    if !record.volume.is_finite() || record.volume < 0.0 {
        return Err(invalid("volume", record.volume));
    }
    Ok(())
}

/// Keep only the requested tickers; `None` keeps everything.
///
/// Requested tickers that do not occur in the input are logged and skipped.
pub fn filter_tickers(bars: Vec<DailyBar>, tickers: Option<&[String]>) -> Vec<DailyBar> {
    let Some(tickers) = tickers else {
        return bars;
    };

    let wanted: HashSet<&str> = tickers.iter().map(|t| t.as_str()).collect();
    let seen: HashSet<&str> = bars.iter().map(|b| b.ticker.as_str()).collect();
    let mut absent: Vec<&str> = wanted.difference(&seen).copied().collect();
    absent.sort_unstable();
    if !absent.is_empty() {
        warn!(tickers = ?absent, "requested tickers not present in input");
    }

    let wanted: HashSet<String> = wanted.into_iter().map(String::from).collect();
    bars.into_iter()
        .filter(|bar| wanted.contains(&bar.ticker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "date,ticker,open,high,low,close,adjclose,volume\n";

    #[test]
    fn reads_and_sorts_rows() {
        let csv = format!(
            "{HEADER}2024-01-03,MSFT,2,3,1,2.5,2.5,10\n\
             2024-01-02,MSFT,1,2,0.5,1.5,1.5,20\n\
             2024-01-02,AAPL,5,6,4,5.5,5.4,30\n"
        );
        let bars = read_prices(csv.as_bytes()).unwrap();
        let keys: Vec<(&str, String)> = bars
            .iter()
            .map(|b| (b.ticker.as_str(), b.date.to_string()))
            .collect();
        assert_eq!(
            keys,
            [
                ("AAPL", "2024-01-02".to_string()),
                ("MSFT", "2024-01-02".to_string()),
                ("MSFT", "2024-01-03".to_string()),
            ]
        );
        assert_eq!(bars[0].adj_close, 5.4);
        assert_eq!(bars[0].volume, 30.0);
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let csv = "ticker,volume,adjclose,close,low,high,open,date,exchange\n\
                   AMD,100,9,9,8,10,8.5,2024-02-01,NASDAQ\n";
        let bars = read_prices(csv.as_bytes()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, 8.5);
        assert_eq!(bars[0].high, 10.0);
    }

    #[test]
    fn missing_columns_are_listed_sorted() {
        let csv = "date,ticker,open,close\n2024-01-02,X,1,1\n";
        match read_prices(csv.as_bytes()) {
            Err(LoadError::MissingColumns(cols)) => {
                assert_eq!(cols, ["adjclose", "high", "low", "volume"]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn malformed_date_carries_row_context() {
        let csv = format!("{HEADER}2024-01-02,X,1,1,1,1,1,1\nyesterday,X,1,1,1,1,1,1\n");
        match read_prices(csv.as_bytes()) {
            Err(LoadError::Core(CoreError::MalformedDate { ticker, row, value })) => {
                assert_eq!(ticker, "X");
                assert_eq!(row, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("expected MalformedDate, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_price_is_a_record_error() {
        let csv = format!("{HEADER}2024-01-02,X,abc,1,1,1,1,1\n");
        assert!(matches!(
            read_prices(csv.as_bytes()),
            Err(LoadError::Record { row: 1, .. })
        ));
    }

    #[test]
    fn nan_price_and_negative_volume_are_rejected() {
        let csv = format!("{HEADER}2024-01-02,X,1,1,1,NaN,1,1\n");
        assert!(matches!(
            read_prices(csv.as_bytes()),
            Err(LoadError::InvalidValue { column: "close", .. })
        ));

        let csv = format!("{HEADER}2024-01-02,X,1,1,1,1,1,-5\n");
        assert!(matches!(
            read_prices(csv.as_bytes()),
            Err(LoadError::InvalidValue { column: "volume", .. })
        ));
    }

    #[test]
    fn filter_keeps_requested_tickers_only() {
        let csv = format!(
            "{HEADER}2024-01-02,A,1,1,1,1,1,1\n2024-01-02,B,1,1,1,1,1,1\n2024-01-02,C,1,1,1,1,1,1\n"
        );
        let bars = read_prices(csv.as_bytes()).unwrap();

        let wanted = vec!["C".to_string(), "A".to_string(), "MISSING".to_string()];
        let kept = filter_tickers(bars.clone(), Some(&wanted));
        let tickers: Vec<&str> = kept.iter().map(|b| b.ticker.as_str()).collect();
        assert_eq!(tickers, ["A", "C"]);

        assert_eq!(filter_tickers(bars.clone(), None), bars);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_prices(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
