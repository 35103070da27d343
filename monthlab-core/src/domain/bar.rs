//! Bars — daily input rows and the monthly rows derived from them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::resample::period::parse_date;

/// A daily row exactly as it appears in the input table, date still unparsed.
///
/// Columns beyond the required eight are ignored by the deserializer.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRecord {
    pub date: String,
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "adjclose")]
    pub adj_close: f64,
    pub volume: f64,
}

impl DailyRecord {
    /// Parse the date column, turning the record into a [`DailyBar`].
    ///
    /// `row` is the 1-based data row number, used only for error context.
    pub fn into_bar(self, row: usize) -> Result<DailyBar, CoreError> {
        let date = parse_date(&self.date).ok_or_else(|| CoreError::MalformedDate {
            ticker: self.ticker.clone(),
            row,
            value: self.date.clone(),
        })?;
        Ok(DailyBar {
            date,
            ticker: self.ticker,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            adj_close: self.adj_close,
            volume: self.volume,
        })
    }
}

/// OHLCV bar for a single ticker on a single trading day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
}

/// One calendar month of a ticker, anchored to the last day of the month.
///
/// Indicator fields stay `None` until the aggregator's output passes through
/// the indicator engine, and the SMA fields remain `None` for the first
/// `window - 1` months of a ticker's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBar {
    pub date: NaiveDate,
    pub ticker: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: f64,
    pub sma_10: Option<f64>,
    pub sma_20: Option<f64>,
    pub ema_10: Option<f64>,
    pub ema_20: Option<f64>,
}

impl MonthlyBar {
    /// A monthly bar seeded from the first daily bar of its bucket.
    pub(crate) fn seed(anchor: NaiveDate, day: &DailyBar) -> Self {
        Self {
            date: anchor,
            ticker: day.ticker.clone(),
            open: day.open,
            high: day.high,
            low: day.low,
            close: day.close,
            adj_close: day.adj_close,
            volume: day.volume,
            sma_10: None,
            sma_20: None,
            ema_10: None,
            ema_20: None,
        }
    }
}
