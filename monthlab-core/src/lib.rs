//! Monthlab Core — daily-to-monthly resampling, moving averages, trailing windows.
//!
//! This crate contains the pure computation of the pipeline:
//! - Domain types (daily bars in, monthly bars out)
//! - Calendar-month period aggregation per ticker
//! - Trailing SMA/EMA indicators over the monthly close
//! - Exact-length trailing window enforcement and its shape self-check
//!
//! Every component operates on one ticker's series at a time; nothing
//! crosses ticker boundaries.

pub mod domain;
pub mod error;
pub mod indicators;
pub mod resample;
pub mod series;
pub mod window;

pub use domain::{DailyBar, DailyRecord, MonthlyBar};
pub use error::CoreError;
pub use indicators::add_indicators;
pub use resample::{aggregate, PeriodRule};
pub use window::{assert_shape, enforce_window, DEFAULT_WINDOW_MONTHS};
