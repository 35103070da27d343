//! Trailing window enforcement.
//!
//! Every ticker must carry at least `n` months of history; the most recent
//! `n` are kept. Insufficient history is a data-quality defect in the input
//! and is never padded.

use tracing::debug;

use crate::domain::MonthlyBar;
use crate::error::CoreError;
use crate::series::{counts_by_ticker, flatten, group_by_ticker};

/// Default number of trailing months kept per ticker.
pub const DEFAULT_WINDOW_MONTHS: usize = 24;

/// Keep the last `n` rows of one ticker's series.
pub fn truncate_series(
    ticker: &str,
    mut series: Vec<MonthlyBar>,
    n: usize,
) -> Result<Vec<MonthlyBar>, CoreError> {
    if series.len() < n {
        return Err(CoreError::InsufficientHistory {
            ticker: ticker.to_string(),
            actual: series.len(),
            required: n,
        });
    }
    let dropped = series.len() - n;
    debug!(ticker, kept = n, dropped, "window enforced");
    Ok(series.split_off(dropped))
}

/// Keep exactly the last `n` months of every ticker, failing on the first
/// ticker (in ticker order) that has fewer than `n`.
pub fn enforce_window(monthly: Vec<MonthlyBar>, n: usize) -> Result<Vec<MonthlyBar>, CoreError> {
    let mut groups = group_by_ticker(monthly);
    for (ticker, series) in groups.iter_mut() {
        series.sort_by_key(|bar| bar.date);
        let owned = std::mem::take(series);
        *series = truncate_series(ticker, owned, n)?;
    }
    Ok(flatten(groups))
}

/// Self-check that every ticker ended up with exactly `n` rows.
pub fn assert_shape(monthly: &[MonthlyBar], n: usize) -> Result<(), CoreError> {
    let mismatched: Vec<(String, usize)> = counts_by_ticker(monthly)
        .into_iter()
        .filter(|&(_, count)| count != n)
        .map(|(ticker, count)| (ticker.to_string(), count))
        .collect();

    if mismatched.is_empty() {
        Ok(())
    } else {
        Err(CoreError::ShapeInvariantViolation {
            expected: n,
            mismatched,
        })
    }
}
