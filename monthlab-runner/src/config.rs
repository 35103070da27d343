//! Serializable pipeline configuration.

use std::path::{Path, PathBuf};

use monthlab_core::{PeriodRule, DEFAULT_WINDOW_MONTHS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tickers selected when the caller does not name any.
pub const DEFAULT_TICKERS: &[&str] = &[
    "AAPL", "AMD", "AMZN", "AVGO", "CSCO", "MSFT", "NFLX", "PEP", "TMUS", "TSLA",
];

/// Period rule token used when none is configured.
pub const DEFAULT_RESAMPLE_RULE: &str = "M";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("window length must be at least 1 month")]
    InvalidWindow,

    #[error("unsupported resample rule '{0}'")]
    UnsupportedRule(String),
}

/// Everything needed to reproduce one run.
///
/// `tickers = None` keeps every ticker present in the input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineConfig {
    pub input_csv: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub tickers: Option<Vec<String>>,

    #[serde(default = "default_resample_rule")]
    pub resample_rule: String,

    /// Trailing months kept per ticker.
    #[serde(default = "default_months")]
    pub months: usize,

    /// Process tickers on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_resample_rule() -> String {
    DEFAULT_RESAMPLE_RULE.to_string()
}

fn default_months() -> usize {
    DEFAULT_WINDOW_MONTHS
}

impl PipelineConfig {
    pub fn new(input_csv: impl Into<PathBuf>) -> Self {
        Self {
            input_csv: input_csv.into(),
            output_dir: default_output_dir(),
            tickers: None,
            resample_rule: default_resample_rule(),
            months: default_months(),
            parallel: false,
        }
    }

    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the config and resolve its period rule.
    pub fn validate(&self) -> Result<PeriodRule, ConfigError> {
        if self.months == 0 {
            return Err(ConfigError::InvalidWindow);
        }
        PeriodRule::resolve(&self.resample_rule)
            .map_err(|_| ConfigError::UnsupportedRule(self.resample_rule.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_takes_defaults() {
        let config = PipelineConfig::from_toml(r#"input_csv = "prices.csv""#).unwrap();
        assert_eq!(config, PipelineConfig::new("prices.csv"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.months, 24);
        assert_eq!(config.resample_rule, "M");
        assert!(config.tickers.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn full_toml_roundtrip() {
        let mut config = PipelineConfig::new("data/daily.csv");
        config.output_dir = PathBuf::from("out");
        config.tickers = Some(vec!["AAPL".into(), "MSFT".into()]);
        config.resample_rule = "ME".into();
        config.months = 12;
        config.parallel = true;

        let text = toml::to_string(&config).unwrap();
        let parsed = PipelineConfig::from_toml(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn missing_input_is_a_parse_error() {
        let err = PipelineConfig::from_toml("months = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn validate_resolves_rule() {
        let config = PipelineConfig::new("x.csv");
        assert_eq!(config.validate().unwrap(), PeriodRule::MonthEnd);
    }

    #[test]
    fn validate_rejects_zero_window() {
        let mut config = PipelineConfig::new("x.csv");
        config.months = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow)));
    }

    #[test]
    fn validate_rejects_weekly_rule() {
        let mut config = PipelineConfig::new("x.csv");
        config.resample_rule = "W".into();
        match config.validate() {
            Err(ConfigError::UnsupportedRule(rule)) => assert_eq!(rule, "W"),
            other => panic!("expected UnsupportedRule, got {other:?}"),
        }
    }

    #[test]
    fn default_ticker_list_has_ten_symbols() {
        assert_eq!(DEFAULT_TICKERS.len(), 10);
        assert!(DEFAULT_TICKERS.contains(&"TSLA"));
    }
}
