//! Range classifier.
//!
//! Buckets percentage changes by magnitude into an ordered list of half-open
//! ranges `[low, high)`. The first matching range in configured order wins,
//! so overlapping ranges resolve deterministically. Magnitudes that match no
//! range are left out of every range count and tallied as `unclassified`.

use serde::Deserialize;
use std::fmt;

/// Half-open magnitude interval `[low, high)`, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct JumpRange {
    pub low: f64,
    pub high: f64,
}

impl JumpRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, magnitude: f64) -> bool {
        self.low <= magnitude && magnitude < self.high
    }
}

impl From<(f64, f64)> for JumpRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

impl fmt::Display for JumpRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Per-range tally, in configuration order. Zero-count ranges are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct JumpCountTable {
    entries: Vec<(JumpRange, usize)>,
    unclassified: usize,
}

impl JumpCountTable {
    pub fn get(&self, range: &JumpRange) -> Option<usize> {
        self.entries
            .iter()
            .find(|(r, _)| r == range)
            .map(|&(_, count)| count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (JumpRange, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all per-range counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Changes whose magnitude fell outside every configured range.
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    /// Largest single range count; 0 for an empty table.
    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|&(_, count)| count).max().unwrap_or(0)
    }
}

/// Incremental classifier. Feed changes with [`record`](Self::record), then
/// [`finish`](Self::finish) to freeze the table.
pub struct JumpCounter {
    entries: Vec<(JumpRange, usize)>,
    unclassified: usize,
}

impl JumpCounter {
    pub fn new(ranges: &[JumpRange]) -> Self {
        Self {
            entries: ranges.iter().map(|&r| (r, 0)).collect(),
            unclassified: 0,
        }
    }

    /// Records one signed percentage change into the first range containing
    /// its magnitude.
    pub fn record(&mut self, change: f64) {
        let magnitude = change.abs();
        match self.entries.iter_mut().find(|(r, _)| r.contains(magnitude)) {
            Some((_, count)) => *count += 1,
            None => self.unclassified += 1,
        }
    }

    pub fn finish(self) -> JumpCountTable {
        JumpCountTable {
            entries: self.entries,
            unclassified: self.unclassified,
        }
    }
}

/// Classifies every change in one pass.
pub fn count_jumps(
    changes: impl IntoIterator<Item = f64>,
    ranges: &[JumpRange],
) -> JumpCountTable {
    let mut counter = JumpCounter::new(ranges);
    for change in changes {
        counter.record(change);
    }
    counter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_ranges;

    fn counts(table: &JumpCountTable) -> Vec<usize> {
        table.iter().map(|(_, c)| c).collect()
    }

    #[test]
    fn test_counts_follow_configured_ranges() {
        let table = count_jumps(vec![0.5, 1.5, 3.5, 5.5, 10.5], &default_ranges());
        assert_eq!(counts(&table), vec![1, 1, 2, 0, 1, 0, 0]);
        assert_eq!(table.get(&JumpRange::new(3.0, 6.0)), Some(2));
        assert_eq!(table.unclassified(), 0);
    }

    #[test]
    fn test_negative_changes_use_magnitude() {
        let table = count_jumps(vec![20.0, -8.333333333333332], &default_ranges());
        assert_eq!(counts(&table), vec![0, 0, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_lower_bound_is_inclusive() {
        let ranges = [JumpRange::new(0.0, 1.0), JumpRange::new(1.0, 3.0)];
        let table = count_jumps(vec![1.0], &ranges);
        assert_eq!(table.get(&ranges[0]), Some(0));
        assert_eq!(table.get(&ranges[1]), Some(1));
    }

    #[test]
    fn test_first_matching_range_wins() {
        let ranges = [JumpRange::new(0.0, 5.0), JumpRange::new(2.0, 8.0)];
        let table = count_jumps(vec![3.0], &ranges);
        assert_eq!(counts(&table), vec![1, 0]);
    }

    #[test]
    fn test_out_of_range_is_dropped_but_tracked() {
        let table = count_jumps(vec![50.0, -75.0, 2.0, f64::NAN], &default_ranges());
        assert_eq!(table.total(), 1);
        assert_eq!(table.unclassified(), 3);
    }

    #[test]
    fn test_zero_count_ranges_are_kept() {
        let table = count_jumps(Vec::new(), &default_ranges());
        assert_eq!(table.len(), 7);
        assert!(table.iter().all(|(_, c)| c == 0));
        assert_eq!(table.max_count(), 0);
    }

    #[test]
    fn test_range_label() {
        assert_eq!(JumpRange::new(0.0, 1.0).to_string(), "0-1");
        assert_eq!(JumpRange::new(0.5, 2.5).to_string(), "0.5-2.5");
    }
}
