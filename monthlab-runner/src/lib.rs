//! Monthlab Runner — pipeline orchestration around `monthlab-core`.
//!
//! This crate provides:
//! - Pipeline configuration (TOML file or programmatic)
//! - CSV loading with required-column checks and the ticker allow-list
//! - The resample → indicators → window pipeline, optionally per-ticker parallel
//! - Per-ticker CSV export
//! - Stage timing through `tracing`

pub mod config;
pub mod export;
pub mod loader;
pub mod pipeline;
pub mod timing;

pub use config::{ConfigError, PipelineConfig, DEFAULT_TICKERS};
pub use export::{write_partitioned_csvs, ExportError, OUTPUT_COLUMNS};
pub use loader::{filter_tickers, load_prices, read_prices, LoadError, REQUIRED_COLUMNS};
pub use pipeline::{process, run, RunError, RunSummary};
