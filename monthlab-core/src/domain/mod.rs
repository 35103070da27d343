//! Domain types for monthlab

pub mod bar;

pub use bar::{DailyBar, DailyRecord, MonthlyBar};
