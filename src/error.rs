use std::path::PathBuf;

use thiserror::Error;

/// Every way a jump-frequency run can fail. No variant is recovered
/// internally; the first error aborts the whole computation.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Malformed input on line {line}: {reason}")]
    MalformedInput { line: u64, reason: String },

    #[error("Division by zero: previous price at position {index} is 0")]
    DivisionByZero { index: usize },

    #[error("Percentage change at position {index} is not finite (previous price {previous})")]
    NonFiniteChange { index: usize, previous: f64 },

    #[error("Failed to parse timestamp '{input}': {reason}")]
    TimestampParse { input: String, reason: String },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Config(String),
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
