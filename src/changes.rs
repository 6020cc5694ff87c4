//! Change series builder.
//!
//! Turns an ordered price sequence into the sequence of consecutive
//! percentage changes: `(current - previous) / previous * 100`.
//!
//! Fewer than two prices yield an empty series, not an error.

use crate::error::{AnalysisError, Result};

/// Percentage change from `previous` to `current`.
///
/// Fails with [`AnalysisError::DivisionByZero`] when `previous` is zero, and
/// with [`AnalysisError::NonFiniteChange`] when the quotient overflows (a
/// subnormal `previous`). `index` is reported in either error.
pub fn percentage_change_at(index: usize, previous: f64, current: f64) -> Result<f64> {
    if previous == 0.0 {
        return Err(AnalysisError::DivisionByZero { index });
    }
    let change = (current - previous) / previous * 100.0;
    if !change.is_finite() {
        return Err(AnalysisError::NonFiniteChange { index, previous });
    }
    Ok(change)
}

/// Percentage change between two adjacent prices.
///
/// A standalone pair has no position, so errors always carry `index: 0`.
/// Use [`percentage_change_at`] when iterating.
pub fn percentage_change(previous: f64, current: f64) -> Result<f64> {
    percentage_change_at(0, previous, current)
}

/// Lazy adapter yielding one change per consecutive pair of prices.
///
/// Only the last seen price is kept. After the first error the iterator is
/// exhausted.
pub struct PercentageChanges<I> {
    prices: I,
    previous: Option<f64>,
    index: usize,
    failed: bool,
}

impl<I> PercentageChanges<I>
where
    I: Iterator<Item = f64>,
{
    pub fn new(prices: impl IntoIterator<IntoIter = I>) -> Self {
        let mut prices = prices.into_iter();
        let previous = prices.next();
        Self {
            prices,
            previous,
            index: 0,
            failed: false,
        }
    }
}

impl<I> Iterator for PercentageChanges<I>
where
    I: Iterator<Item = f64>,
{
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let previous = self.previous?;
        let current = self.prices.next()?;

        let change = percentage_change_at(self.index, previous, current);
        if change.is_err() {
            self.failed = true;
        }
        self.previous = Some(current);
        self.index += 1;
        Some(change)
    }
}

/// Materialized form of [`PercentageChanges`]: `n` prices give `n - 1` changes.
pub fn percentage_changes(prices: &[f64]) -> Result<Vec<f64>> {
    PercentageChanges::new(prices.iter().copied()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_changes_match_reference_values() {
        let changes = percentage_changes(&[100.0, 120.0, 110.0]).unwrap();
        assert_eq!(changes, vec![20.0, -8.333333333333332]);
        assert_eq!(format!("{:.2}", changes[1]), "-8.33");
    }

    #[test]
    fn test_short_series_is_empty() {
        assert!(percentage_changes(&[]).unwrap().is_empty());
        assert!(percentage_changes(&[135.3]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_previous_price_is_an_error() {
        let err = percentage_changes(&[0.0, 100.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero { index: 0 }));

        // The pairwise form has no position to report.
        let err = percentage_change(0.0, 5.0).unwrap_err();
        assert!(matches!(err, AnalysisError::DivisionByZero { index: 0 }));
        let err = percentage_change(1e-320, 5.0).unwrap_err();
        assert!(matches!(err, AnalysisError::NonFiniteChange { index: 0, .. }));
    }

    #[test]
    fn test_subnormal_previous_price_is_an_error() {
        let err = percentage_changes(&[5e-324, 1.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::NonFiniteChange { index: 0, .. }));

        let err = percentage_changes(&[1.0, 2.0, 1e-320, 100.0]).unwrap_err();
        assert!(matches!(err, AnalysisError::NonFiniteChange { index: 2, .. }));
    }

    #[test]
    fn test_zero_current_price_is_fine() {
        // -100% is a real move; only the divisor must be non-zero.
        assert_eq!(percentage_changes(&[50.0, 0.0]).unwrap(), vec![-100.0]);
    }

    #[test]
    fn test_error_reports_pair_index_and_stops() {
        let mut iter = PercentageChanges::new(vec![10.0, 20.0, 0.0, 5.0, 6.0]);
        assert_eq!(iter.next().unwrap().unwrap(), 100.0);
        assert_eq!(iter.next().unwrap().unwrap(), -100.0);
        assert!(matches!(
            iter.next(),
            Some(Err(AnalysisError::DivisionByZero { index: 2 }))
        ));
        assert!(iter.next().is_none());
    }
}
