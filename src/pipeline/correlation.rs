//! Train/test trend correlation

use std::collections::HashMap;

use super::binning::BinSummary;
use crate::utils::{print_info, print_warning};

/// Correlation between the per-bin target means of two summaries.
///
/// Null bins are ignored. If the first interval labels differ (each summary
/// labels its first bin with its own minimum) the `test` label is aligned to
/// the `train` one, then bins are left-joined on label. Returns 0 when the
/// correlation is undefined: a train bin without a test counterpart, an empty
/// bin, fewer than two bins, or no variation in either trend.
pub fn get_trend_correlation(train: &BinSummary, test: &BinSummary) -> f64 {
    let train = train.without_nulls();
    let mut test = test.without_nulls();

    if let (Some(train_first), Some(test_first)) = (train.rows().first(), test.rows().first()) {
        if train_first.label != test_first.label {
            test = test.with_first_label(train_first.label.clone());
        }
    }

    let test_means: HashMap<&str, f64> = test
        .rows()
        .iter()
        .map(|r| (r.label.as_str(), r.target_mean))
        .collect();

    let unmatched: Vec<&str> = train
        .rows()
        .iter()
        .map(|r| r.label.as_str())
        .filter(|label| !test_means.contains_key(label))
        .collect();
    if !unmatched.is_empty() {
        print_warning(&format!(
            "Bins of '{}' missing from the test summary: {}",
            train.feature,
            unmatched.join(", ")
        ));
    }

    let (train_series, test_series): (Vec<f64>, Vec<f64>) = train
        .rows()
        .iter()
        .map(|r| {
            let paired = test_means.get(r.label.as_str()).copied().unwrap_or(f64::NAN);
            (r.target_mean, paired)
        })
        .unzip();

    match pearson_correlation(&train_series, &test_series) {
        Some(corr) => corr,
        None => {
            print_info("Only one bin created and hence, correlation can't be calculated");
            0.0
        }
    }
}

/// Pearson correlation of two equally long series.
///
/// Returns `None` when the result is undefined: mismatched or fewer than two
/// points, any NaN value, or zero variance in either series.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return None;
    }
    if xs.iter().chain(ys.iter()).any(|v| v.is_nan()) {
        return None;
    }

    // Single-pass Welford update for numerical stability
    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        count += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let corr = cov_xy / (var_x.sqrt() * var_y.sqrt());
    Some(corr.clamp(-1.0, 1.0))
}
