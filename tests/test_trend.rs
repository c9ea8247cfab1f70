//! Tests for counting trend direction changes across bins

use featrend::pipeline::{
    count_direction_changes, fit_bins, get_trend_changes, BinKind, BinSummary, BinSummaryRow,
    DEFAULT_TREND_THRESHOLD, NULL_LABEL,
};
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn interval(label: &str, target_mean: f64) -> BinSummaryRow {
    BinSummaryRow {
        label: label.to_string(),
        samples: 1,
        target_mean,
        feature_mean: 0.0,
        kind: BinKind::Interval { lower: 0.0, upper: 1.0 },
    }
}

#[test]
fn test_monotonic_trend_has_no_changes() {
    let df = df! {
        "x" => (1..=50).map(|v| v as f64).collect::<Vec<_>>(),
        "y" => (1..=50).map(|v| v as f64 * 2.0).collect::<Vec<_>>(),
    }
    .unwrap();

    let fitted = fit_bins(&df, "x", "y", 5).unwrap();
    assert_eq!(get_trend_changes(&fitted.summary, DEFAULT_TREND_THRESHOLD), 0);
}

#[test]
fn test_step_trend_from_hundred_example() {
    let df = common::create_hundred_dataframe();
    let fitted = fit_bins(&df, "feature", "target", 10).unwrap();

    // Flat, one jump, flat again: a single direction and no reversal
    assert_eq!(get_trend_changes(&fitted.summary, DEFAULT_TREND_THRESHOLD), 0);
}

#[test]
fn test_zigzag_counts_every_reversal() {
    assert_eq!(count_direction_changes(&[1.0, 5.0, 1.0, 5.0, 1.0], 0.03), 3);
    assert_eq!(count_direction_changes(&[0.1, 0.2, 0.15, 0.3], 0.0), 2);
}

#[test]
fn test_null_bin_is_ignored() {
    let mut rows = vec![BinSummaryRow {
        label: NULL_LABEL.to_string(),
        samples: 3,
        target_mean: 100.0,
        feature_mean: f64::NAN,
        kind: BinKind::Nulls,
    }];
    rows.extend([interval("a", 0.1), interval("b", 0.2), interval("c", 0.3)]);
    let summary = BinSummary::new("x", "y", rows);

    assert_eq!(get_trend_changes(&summary, DEFAULT_TREND_THRESHOLD), 0);
}

#[test]
fn test_small_wiggles_below_threshold_are_flat() {
    // Range 1.0, threshold 0.03: the 0.01 dip is flat
    let means = [0.0, 0.5, 0.49, 1.0];
    assert_eq!(count_direction_changes(&means, 0.03), 0);
    assert_eq!(count_direction_changes(&means, 0.0), 2);
}

#[test]
fn test_degenerate_inputs() {
    assert_eq!(count_direction_changes(&[], 0.03), 0);
    assert_eq!(count_direction_changes(&[0.4], 0.03), 0);
    assert_eq!(count_direction_changes(&[0.4, 0.4, 0.4], 0.03), 0);

    let summary = BinSummary::new("x", "y", vec![interval("only", 0.7)]);
    assert_eq!(get_trend_changes(&summary, DEFAULT_TREND_THRESHOLD), 0);
}

#[test]
fn test_empty_bins_do_not_create_changes() {
    assert_eq!(count_direction_changes(&[1.0, 3.0, f64::NAN, 0.0, 2.0, 1.0], 0.03), 1);
}
