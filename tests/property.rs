use proptest::prelude::*;

use jump_frequency::changes::percentage_changes;
use jump_frequency::classifier::{JumpRange, count_jumps};

/// Contiguous ranges from 0 with the last one open-ended.
fn covering_ranges() -> impl Strategy<Value = Vec<JumpRange>> {
    prop::collection::vec(0.1f64..20.0, 1..8).prop_map(|widths| {
        let mut low = 0.0;
        let mut ranges: Vec<JumpRange> = widths
            .into_iter()
            .map(|w| {
                let r = JumpRange::new(low, low + w);
                low += w;
                r
            })
            .collect();
        ranges.push(JumpRange::new(low, f64::INFINITY));
        ranges
    })
}

proptest! {
    #[test]
    fn counts_are_conserved_over_covering_ranges(
        changes in prop::collection::vec(-200.0f64..200.0, 0..200),
        ranges in covering_ranges(),
    ) {
        let table = count_jumps(changes.iter().copied(), &ranges);
        prop_assert_eq!(table.total(), changes.len());
        prop_assert_eq!(table.unclassified(), 0);
        prop_assert_eq!(table.len(), ranges.len());
    }

    #[test]
    fn classification_is_deterministic(
        changes in prop::collection::vec(-60.0f64..60.0, 0..100),
        ranges in covering_ranges(),
    ) {
        let a = count_jumps(changes.iter().copied(), &ranges);
        let b = count_jumps(changes.iter().copied(), &ranges);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn change_series_is_one_shorter(prices in prop::collection::vec(0.01f64..1e6, 0..50)) {
        let changes = percentage_changes(&prices).unwrap();
        prop_assert_eq!(changes.len(), prices.len().saturating_sub(1));
        prop_assert!(changes.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn change_series_never_yields_non_finite(
        prices in prop::collection::vec(
            prop_oneof![Just(5e-324f64), Just(1e-310f64), 1e-300f64..1e6],
            2..20,
        ),
    ) {
        if let Ok(changes) = percentage_changes(&prices) {
            prop_assert!(changes.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn every_change_lands_in_first_matching_range(change in -100.0f64..100.0) {
        let ranges = [
            JumpRange::new(0.0, 5.0),
            JumpRange::new(2.0, 8.0),
            JumpRange::new(0.0, 100.0),
        ];
        let table = count_jumps([change], &ranges);
        let expected = ranges.iter().position(|r| r.contains(change.abs()));
        let hit: Vec<usize> = table.iter().map(|(_, c)| c).collect();
        for (i, count) in hit.iter().enumerate() {
            prop_assert_eq!(*count, usize::from(Some(i) == expected));
        }
    }
}
