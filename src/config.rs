use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classifier::JumpRange;
use crate::error::{AnalysisError, Result};

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "jump_frequency.yaml";

/// Percentage ranges used when the config does not list any.
pub fn default_ranges() -> Vec<JumpRange> {
    [
        (0.0, 1.0),
        (1.0, 3.0),
        (3.0, 6.0),
        (6.0, 10.0),
        (10.0, 15.0),
        (15.0, 25.0),
        (25.0, 50.0),
    ]
    .into_iter()
    .map(JumpRange::from)
    .collect()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Asset name used in report lines and the chart title.
    pub asset: String,

    /// CSV price history, oldest row first.
    pub input: PathBuf,

    /// Chart image path. `None` prints a text histogram instead.
    pub output: Option<PathBuf>,

    pub price_column: String,
    pub timestamp_column: String,

    /// Ordered `[low, high]` pairs; first match wins.
    pub ranges: Vec<JumpRange>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            asset: "Bitcoin".to_string(),
            input: PathBuf::from("btc-usd-max.csv"),
            output: Some(PathBuf::from("bitcoin_jumps_frequency.svg")),
            price_column: "price".to_string(),
            timestamp_column: "snapped_at".to_string(),
            ranges: default_ranges(),
        }
    }
}

impl AnalysisConfig {
    /// Loads `path`, or the default file from the working directory.
    /// A missing default file is not an error: built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        let yaml_content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !explicit => {
                info!("No {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                return Ok(Self::default());
            }
            Err(e) => return Err(AnalysisError::io(path, e)),
        };

        let config = Self::from_yaml(&yaml_content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Range sanity. Overlaps are allowed; contiguity is not checked.
    pub fn validate(&self) -> Result<()> {
        if self.ranges.is_empty() {
            return Err(AnalysisError::Config("ranges must not be empty".into()));
        }
        for range in &self.ranges {
            if !range.low.is_finite() || range.low < 0.0 || range.high.is_nan() {
                return Err(AnalysisError::Config(format!("invalid bounds in range {}", range)));
            }
            if range.low >= range.high {
                return Err(AnalysisError::Config(format!("range {} has low >= high", range)));
            }
        }
        if self.price_column.is_empty() || self.timestamp_column.is_empty() {
            return Err(AnalysisError::Config("column names must not be empty".into()));
        }
        Ok(())
    }
}
