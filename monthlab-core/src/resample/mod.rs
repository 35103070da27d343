//! Daily → monthly period aggregation.

pub mod aggregate;
pub mod period;

pub use aggregate::{aggregate, aggregate_ticker};
pub use period::{month_end, parse_date, PeriodRule};
