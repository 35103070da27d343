//! Trailing moving averages over a ticker's monthly close.
//!
//! Indicators are pure functions: close history in, series of the same
//! length out. A cell is `None` while the indicator lacks history, never a
//! sentinel number.
//!
//! SMA and EMA treat the warmup differently. The SMA has a `window - 1`
//! long absent prefix. The EMA is recursive from the first observation
//! (seeded with `close[0]`) and is present on every row.

pub mod ema;
pub mod sma;

pub use ema::Ema;
pub use sma::Sma;

use tracing::debug;

use crate::domain::MonthlyBar;
use crate::series::{flatten, group_by_ticker};

/// Short indicator window (months).
pub const SHORT_WINDOW: usize = 10;

/// Long indicator window (months).
pub const LONG_WINDOW: usize = 20;

/// Trait for indicators over a close-price series.
///
/// # Look-ahead guard
/// The value at index `t` may only depend on `closes[..=t]`.
pub trait Indicator: Send + Sync {
    /// Column name (e.g., "sma_10").
    fn name(&self) -> &str;

    /// Number of leading cells that are `None`.
    fn lookback(&self) -> usize;

    /// Compute the indicator over the full series.
    ///
    /// Returns a `Vec` of the same length as `closes`.
    fn compute(&self, closes: &[f64]) -> Vec<Option<f64>>;
}

/// Attach `sma_10`, `sma_20`, `ema_10` and `ema_20` to one ticker's series.
///
/// `series` must be a single ticker in ascending date order.
pub fn apply_indicators(series: &mut [MonthlyBar]) {
    let closes: Vec<f64> = series.iter().map(|bar| bar.close).collect();

    let sma_10 = Sma::new(SHORT_WINDOW).compute(&closes);
    let sma_20 = Sma::new(LONG_WINDOW).compute(&closes);
    let ema_10 = Ema::new(SHORT_WINDOW).compute(&closes);
    let ema_20 = Ema::new(LONG_WINDOW).compute(&closes);

    for (i, bar) in series.iter_mut().enumerate() {
        bar.sma_10 = sma_10[i];
        bar.sma_20 = sma_20[i];
        bar.ema_10 = ema_10[i];
        bar.ema_20 = ema_20[i];
    }
}

/// Attach indicators to every ticker. Rows are never removed; output is
/// sorted by (ticker, date).
pub fn add_indicators(monthly: Vec<MonthlyBar>) -> Vec<MonthlyBar> {
    let mut groups = group_by_ticker(monthly);
    for (ticker, series) in groups.iter_mut() {
        series.sort_by_key(|bar| bar.date);
        apply_indicators(series);
        debug!(%ticker, months = series.len(), "indicators attached");
    }
    flatten(groups)
}

/// Closes as monthly bars, one month apart, for indicator tests.
#[cfg(test)]
pub fn make_monthly(closes: &[f64]) -> Vec<MonthlyBar> {
    use crate::resample::month_end;
    use chrono::{Months, NaiveDate};

    let base = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let date = month_end(base.checked_add_months(Months::new(i as u32)).unwrap()).unwrap();
            MonthlyBar {
                date,
                ticker: "TEST".to_string(),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                adj_close: close,
                volume: 1000.0,
                sma_10: None,
                sma_20: None,
                ema_10: None,
                ema_20: None,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
