//! Reduce each ticker's daily bars to one bar per calendar month.
//!
//! Per-column reduction:
//! - open      = open of the earliest date in the bucket
//! - high      = max high
//! - low       = min low
//! - close     = close of the latest date
//! - adj_close = adj_close of the latest date
//! - volume    = sum of volume
//!
//! Months without any daily bar produce no row; nothing is interpolated.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use super::period::PeriodRule;
use crate::domain::{DailyBar, MonthlyBar};
use crate::error::CoreError;
use crate::series::{flatten, group_by_ticker};

/// Running reduction of one bucket.
struct Bucket {
    bar: MonthlyBar,
    first: NaiveDate,
    last: NaiveDate,
}

impl Bucket {
    fn start(anchor: NaiveDate, day: &DailyBar) -> Self {
        Self {
            bar: MonthlyBar::seed(anchor, day),
            first: day.date,
            last: day.date,
        }
    }

    fn absorb(&mut self, day: &DailyBar) {
        if day.date < self.first {
            self.first = day.date;
            self.bar.open = day.open;
        }
        if day.date >= self.last {
            self.last = day.date;
            self.bar.close = day.close;
            self.bar.adj_close = day.adj_close;
        }
        self.bar.high = self.bar.high.max(day.high);
        self.bar.low = self.bar.low.min(day.low);
        self.bar.volume += day.volume;
    }
}

/// Aggregate one ticker's daily bars into monthly bars, ascending by date.
pub fn aggregate_ticker(
    days: &[DailyBar],
    rule: PeriodRule,
) -> Result<Vec<MonthlyBar>, CoreError> {
    let mut buckets: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();

    for day in days {
        let anchor = rule
            .anchor(day.date)
            .ok_or_else(|| CoreError::DateOutOfRange {
                ticker: day.ticker.clone(),
                date: day.date,
            })?;
        match buckets.entry(anchor) {
            Entry::Vacant(slot) => {
                slot.insert(Bucket::start(anchor, day));
            }
            Entry::Occupied(mut slot) => slot.get_mut().absorb(day),
        }
    }

    Ok(buckets.into_values().map(|bucket| bucket.bar).collect())
}

/// Aggregate every ticker. Output is sorted by (ticker, date).
pub fn aggregate(daily: Vec<DailyBar>, rule: PeriodRule) -> Result<Vec<MonthlyBar>, CoreError> {
    let mut monthly = BTreeMap::new();
    for (ticker, days) in group_by_ticker(daily) {
        let bars = aggregate_ticker(&days, rule)?;
        debug!(%ticker, days = days.len(), months = bars.len(), "aggregated");
        monthly.insert(ticker, bars);
    }
    Ok(flatten(monthly))
}
