use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{AnalysisError, Result};

/// Date and time part of a snapshot timestamp, e.g. `2013-04-28 00:00:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone abbreviations accepted after the time. All denote UTC.
const UTC_ZONES: [&str; 3] = ["UTC", "GMT", "Z"];

/// Parses `YYYY-MM-DD HH:MM:SS <TZ>` where `<TZ>` is a UTC abbreviation.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    let err = |reason: String| AnalysisError::TimestampParse {
        input: text.to_string(),
        reason,
    };

    let trimmed = text.trim();
    let (datetime, zone) = trimmed
        .rsplit_once(' ')
        .ok_or_else(|| err("missing timezone abbreviation".to_string()))?;

    if !UTC_ZONES.contains(&zone) {
        return Err(err(format!("unsupported timezone '{}'", zone)));
    }

    let naive = NaiveDateTime::parse_from_str(datetime, TIMESTAMP_FORMAT)
        .map_err(|e| err(e.to_string()))?;
    Ok(naive.and_utc())
}
