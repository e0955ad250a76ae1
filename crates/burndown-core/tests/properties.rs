use burndown_core::calendar::{add_business_days, elapsed_business_days, is_weekend};
use burndown_core::labels::{SizeLabel, decode_labels};
use burndown_core::{StageStats, forecast};
use chrono::Days;
use proptest::prelude::*;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(2000))]

    // Label decoder
    #[test]
    fn hours_equal_sum_of_table_weights(labels in arb_labels()) {
        let expected: u64 = labels
            .iter()
            .filter_map(|l| SizeLabel::from_label(l))
            .map(SizeLabel::hours)
            .sum();
        prop_assert_eq!(decode_labels(&labels).hours, expected);
    }

    // Stage classifier
    #[test]
    fn open_and_test_partition_open_items(items in arb_items()) {
        let stats = StageStats::classify(&items);
        let open_items = items.iter().filter(|i| i.is_open()).count();
        let closed_items = items.len() - open_items;

        prop_assert_eq!(stats.open.tickets + stats.test.tickets, open_items);
        prop_assert_eq!(stats.closed.tickets, closed_items);
        prop_assert_eq!(stats.total_tickets(), items.len());
        prop_assert!(stats.new.tickets <= open_items);
        prop_assert!(stats.in_progress.tickets <= open_items);
    }

    #[test]
    fn stage_hours_add_up_to_item_hours(items in arb_items()) {
        let stats = StageStats::classify(&items);
        let total: u64 = items.iter().map(|i| decode_labels(&i.labels).hours).sum();
        prop_assert_eq!(stats.open.hours + stats.test.hours + stats.closed.hours, total);
    }

    // Business-day calculator
    #[test]
    fn elapsed_matches_day_by_day_count((start, end) in arb_date_range()) {
        let elapsed = elapsed_business_days(start, end).unwrap();
        prop_assert_eq!(elapsed, brute_force_business_days(start, end) as f64);
    }

    #[test]
    fn elapsed_is_zero_on_same_day(day in arb_date()) {
        prop_assert_eq!(elapsed_business_days(day, day).unwrap(), 0.0);
    }

    #[test]
    fn elapsed_rejects_reversed_ranges((start, end) in arb_date_range()) {
        prop_assume!(start < end);
        prop_assert!(elapsed_business_days(end, start).is_err());
    }

    #[test]
    fn whole_count_from_weekday_round_trips(day in arb_date(), n in 1u32..200) {
        prop_assume!(!is_weekend(day));
        let target = add_business_days(day, f64::from(n)).unwrap();
        prop_assert!(!is_weekend(target));
        prop_assert_eq!(elapsed_business_days(day, target).unwrap(), f64::from(n));
    }

    #[test]
    fn fraction_rounds_up_to_next_whole_day(day in arb_date(), n in 0u32..50, frac in 0.01f64..0.99) {
        let fractional = add_business_days(day, f64::from(n) + frac).unwrap();
        let ceiling = add_business_days(day, f64::from(n + 1)).unwrap();
        prop_assert_eq!(fractional, ceiling);
    }

    #[test]
    fn non_positive_counts_never_move(day in arb_date(), count in -100.0f64..=0.0) {
        prop_assert_eq!(add_business_days(day, count).unwrap(), day);
    }

    #[test]
    fn one_business_day_skips_at_most_a_weekend(day in arb_date()) {
        let next = add_business_days(day, 1.0).unwrap();
        prop_assert!(next > day);
        prop_assert!(next <= day + Days::new(3));
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn pipeline_is_deterministic(items in arb_items(), (start, today) in arb_date_range()) {
        let first = forecast(&items, start, today).unwrap();
        let second = forecast(&items, start, today).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn projected_end_dates_never_precede_today(items in arb_items(), (start, today) in arb_date_range()) {
        let report = forecast(&items, start, today).unwrap();
        for projection in &report.projections {
            if let Some(end) = projection.outcome.end_date() {
                prop_assert!(end >= today);
            }
        }
    }
}
