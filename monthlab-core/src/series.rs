//! Per-ticker grouping.
//!
//! The pipeline's unit of work is one ticker's ordered series. Rows are
//! grouped into a `BTreeMap` so that iterating the map yields tickers in
//! lexicographic order, which is also the output order.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DailyBar, MonthlyBar};

/// A row that belongs to one ticker on one date.
pub trait TickerRow {
    fn ticker(&self) -> &str;
    fn date(&self) -> NaiveDate;
}

impl TickerRow for DailyBar {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl TickerRow for MonthlyBar {
    fn ticker(&self) -> &str {
        &self.ticker
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Ticker → that ticker's rows, in input order.
pub type TickerSeries<T> = BTreeMap<String, Vec<T>>;

/// Partition rows by ticker, preserving the relative order within each ticker.
pub fn group_by_ticker<T: TickerRow>(rows: Vec<T>) -> TickerSeries<T> {
    let mut groups: TickerSeries<T> = BTreeMap::new();
    for row in rows {
        match groups.get_mut(row.ticker()) {
            Some(series) => series.push(row),
            None => {
                groups.insert(row.ticker().to_string(), vec![row]);
            }
        }
    }
    groups
}

/// Concatenate grouped series back into one sequence, ticker by ticker.
pub fn flatten<T>(groups: TickerSeries<T>) -> Vec<T> {
    groups.into_values().flatten().collect()
}

/// Stable sort by (ticker, date).
pub fn sort_by_ticker_date<T: TickerRow>(rows: &mut [T]) {
    rows.sort_by(|a, b| {
        a.ticker()
            .cmp(b.ticker())
            .then_with(|| a.date().cmp(&b.date()))
    });
}

/// Number of rows per ticker.
pub fn counts_by_ticker<T: TickerRow>(rows: &[T]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for row in rows {
        *counts.entry(row.ticker()).or_insert(0) += 1;
    }
    counts
}
