//! Price data models.

use chrono::{DateTime, Utc};

use crate::error::{AnalysisError, Result};
use crate::timestamp::parse_timestamp;

/// One CSV row as text, before validation.
///
/// Only the timestamp and price columns are read; the `market_cap` and
/// `total_volume` columns of a CoinGecko export are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord<'a> {
    pub line: u64,
    pub timestamp: Option<&'a str>,
    pub price: Option<&'a str>,
}

/// A validated price snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl TryFrom<PriceRecord<'_>> for PriceObservation {
    type Error = AnalysisError;

    fn try_from(record: PriceRecord<'_>) -> Result<Self> {
        let malformed = |reason: String| AnalysisError::MalformedInput {
            line: record.line,
            reason,
        };

        let timestamp_text = record
            .timestamp
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| malformed("missing timestamp".to_string()))?;
        let price_text = record
            .price
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| malformed("missing price".to_string()))?;

        let price: f64 = price_text
            .parse()
            .map_err(|_| malformed(format!("price '{}' is not a number", price_text)))?;

        // Zero is let through: the change builder reports it as a division by zero.
        if !price.is_finite() || price < 0.0 {
            return Err(malformed(format!(
                "price '{}' must be a finite non-negative number",
                price_text
            )));
        }

        Ok(Self {
            timestamp: parse_timestamp(timestamp_text)?,
            price,
        })
    }
}
