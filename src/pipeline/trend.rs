//! Trend change detection across ordered bins
//!
//! A trend change is a reversal in the direction of the target mean between
//! consecutive bins. Differences smaller than a fraction of the overall
//! target-mean range are treated as flat and carry no direction.

use super::binning::BinSummary;
use super::stats::nan_min_max;

/// Default fraction of the target-mean range below which a step counts as flat
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.03;

/// Count how many times the target mean changes direction across bins.
///
/// The null bin is ignored. Returns 0 for a monotonic trend and for summaries
/// with fewer than two non-flat steps.
pub fn get_trend_changes(summary: &BinSummary, threshold: f64) -> usize {
    let means: Vec<f64> = summary.interval_rows().map(|r| r.target_mean).collect();
    count_direction_changes(&means, threshold)
}

/// Count sign flips among the non-flat successive differences of `means`
pub fn count_direction_changes(means: &[f64], threshold: f64) -> usize {
    let Some((min, max)) = nan_min_max(means.iter().copied()) else {
        return 0;
    };
    let flat_below = threshold * (max - min);

    let directions: Vec<f64> = means
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|d| !d.is_nan())
        .filter(|d| *d != 0.0 && d.abs() >= flat_below)
        .map(f64::signum)
        .collect();

    directions
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .count()
}
