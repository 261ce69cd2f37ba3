//! Property-based tests for acs-coverage.
//!
//! Uses proptest to check the parser and calculator invariants over
//! arbitrary range text and totals.

use acs_coverage::prelude::*;
use proptest::prelude::*;

/// Tokens biased towards the shapes people actually type, plus junk
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..40).prop_map(|v| v.to_string()),
        (0i64..40, 0i64..40).prop_map(|(a, b)| format!("{a}-{b}")),
        (0i64..40, 0i64..40).prop_map(|(a, b)| format!(" {a} - {b} ")),
        "[a-z]{1,4}",
        Just(String::new()),
        Just("-5".to_string()),
        Just("5-".to_string()),
    ]
}

fn range_text() -> impl Strategy<Value = (Vec<String>, String)> {
    (
        prop::collection::vec(token(), 0..12),
        prop::sample::select(vec![",", ";", ", ", " ; "]),
    )
        .prop_map(|(tokens, sep)| {
            let text = tokens.join(sep);
            (tokens, text)
        })
}

proptest! {
    /// Every parsed unit lies in [1, total].
    #[test]
    fn prop_units_within_bounds(
        (_, text) in range_text(),
        total in -5i64..30
    ) {
        let units = parse_units(&text, total);
        for unit in units.iter() {
            prop_assert!(unit.as_u32() >= 1);
            prop_assert!(i64::from(unit.as_u32()) <= total);
        }
        prop_assert!(units.len() <= u64::try_from(total.max(0)).unwrap_or(0));
    }

    /// Same input, same output.
    #[test]
    fn prop_parse_is_deterministic(
        (_, text) in range_text(),
        total in 0i64..30
    ) {
        prop_assert_eq!(parse_units(&text, total), parse_units(&text, total));
    }

    /// Reordering tokens never changes the set.
    #[test]
    fn prop_order_independent(
        (tokens, _) in range_text(),
        total in 0i64..30
    ) {
        let forward = tokens.join(",");
        let mut reversed_tokens = tokens.clone();
        reversed_tokens.reverse();
        let backward = reversed_tokens.join(",");
        prop_assert_eq!(parse_units(&forward, total), parse_units(&backward, total));
    }

    /// Iteration yields strictly increasing units, so no duplicates.
    #[test]
    fn prop_no_duplicates(
        (_, text) in range_text(),
        total in 0i64..30
    ) {
        let units: Vec<u32> = parse_units(&text, total).iter().map(UnitId::as_u32).collect();
        prop_assert!(units.windows(2).all(|w| w[0] < w[1]));
    }

    /// The compact text form reads back to the same set.
    #[test]
    fn prop_range_text_reparses(
        (_, text) in range_text(),
        total in 0i64..30
    ) {
        let units = parse_units(&text, total);
        prop_assert_eq!(parse_units(&units.to_range_text(), total), units);
    }

    /// Counts add up and the percentage stays in range.
    #[test]
    fn prop_compute_consistent(
        (_, text) in range_text(),
        total in 0i64..30
    ) {
        let result = compute(total, &parse_units(&text, total));
        prop_assert_eq!(result.covered_count + result.uncovered_count, total as u64);
        prop_assert!(result.percentage <= 100);
        if total == 0 {
            prop_assert_eq!(result.percentage, 0);
        }
    }

    /// Status follows the tiered thresholds.
    #[test]
    fn prop_status_matches_thresholds(
        covered in 0i64..200,
        total in 1i64..200
    ) {
        let covered = covered.min(total);
        let text = if covered == 0 { String::new() } else { format!("1-{covered}") };
        let result = compute(total, &parse_units(&text, total));
        let expected = if result.percentage >= 67 {
            CoverageStatus::Complete
        } else if result.percentage >= 34 {
            CoverageStatus::Partial
        } else {
            CoverageStatus::Uncovered
        };
        prop_assert_eq!(result.status, expected);
    }

    /// Percentage is round-half-up of covered / total * 100.
    #[test]
    fn prop_percentage_rounds_half_up(
        covered in 0u64..1000,
        total in 1u64..1000
    ) {
        let covered = covered.min(total);
        let exact = covered as f64 * 100.0 / total as f64;
        let got = f64::from(acs_coverage::percentage(covered, total));
        prop_assert_eq!(got, (exact + 0.5).floor());
    }

    /// Hand-built sets are cut down to [1, total] before counting.
    #[test]
    fn prop_result_units_match_count(
        spans in prop::collection::vec((0u32..60, 0u32..20), 0..6),
        total in -5i64..40
    ) {
        let mut set = UnitSet::new();
        for (start, width) in spans {
            set.insert_range(start..=start + width);
        }
        let result = compute(total, &set);
        prop_assert_eq!(result.covered_count, result.covered_units.len());
        prop_assert!(result.covered_units.iter().all(|u| u.as_u32() >= 1 && i64::from(u.as_u32()) <= total));
    }

    /// Parsing arbitrary text never panics.
    #[test]
    fn prop_parse_never_panics(text in ".{0,64}", total in any::<i64>()) {
        let _ = parse_detailed(&text, total.min(10_000));
    }
}
