//! Period rules and calendar arithmetic.
//!
//! Bucket boundaries come from the calendar alone: a date belongs to the
//! bucket anchored on the last day of its month, whether or not any other
//! day of that month carries data.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::CoreError;

/// Calendar granularity used to bucket daily bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodRule {
    /// Calendar month, anchored to the month's last day.
    #[default]
    MonthEnd,
}

/// Canonical month-end token.
const MONTH_END: &str = "ME";

/// Tokens that mean the same calendar-month-end rule.
const MONTH_END_EQUIVALENTS: &[&str] = &["M", "MONTH", "MONTHLY"];

impl PeriodRule {
    /// Resolve a rule token, substituting a known-equivalent month-end
    /// token when the exact spelling differs from the canonical one.
    pub fn resolve(token: &str) -> Result<Self, CoreError> {
        let normalized = token.trim().to_ascii_uppercase();
        if normalized == MONTH_END {
            return Ok(PeriodRule::MonthEnd);
        }
        if MONTH_END_EQUIVALENTS.contains(&normalized.as_str()) {
            debug!(token, canonical = MONTH_END, "substituting equivalent period rule");
            return Ok(PeriodRule::MonthEnd);
        }
        Err(CoreError::UnsupportedRule(token.to_string()))
    }

    /// Canonical token for this rule.
    pub fn token(&self) -> &'static str {
        match self {
            PeriodRule::MonthEnd => MONTH_END,
        }
    }

    /// The anchor date of the period containing `date`.
    pub fn anchor(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            PeriodRule::MonthEnd => month_end(date),
        }
    }
}

impl FromStr for PeriodRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for PeriodRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Last calendar day of the month containing `date`.
///
/// `None` only at the edge of chrono's representable range.
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date, accepting a midnight-style timestamp and
/// discarding its time of day.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}
