//! Error taxonomy for the core pipeline.
//!
//! Every variant is fatal: the run aborts at the first one raised.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("malformed date '{value}' for ticker '{ticker}' at row {row}")]
    MalformedDate {
        ticker: String,
        row: usize,
        value: String,
    },

    #[error("date {date} for ticker '{ticker}' has no representable month end")]
    DateOutOfRange { ticker: String, date: NaiveDate },

    #[error("unsupported period rule '{0}' (expected a calendar month-end rule such as \"ME\" or \"M\")")]
    UnsupportedRule(String),

    #[error("ticker '{ticker}' has only {actual} monthly rows; expected at least {required}")]
    InsufficientHistory {
        ticker: String,
        actual: usize,
        required: usize,
    },

    #[error("bad month counts after truncation (expected {expected}): {}", format_counts(.mismatched))]
    ShapeInvariantViolation {
        expected: usize,
        mismatched: Vec<(String, usize)>,
    },
}

fn format_counts(mismatched: &[(String, usize)]) -> String {
    mismatched
        .iter()
        .map(|(ticker, count)| format!("{ticker}={count}"))
        .collect::<Vec<_>>()
        .join(", ")
}
