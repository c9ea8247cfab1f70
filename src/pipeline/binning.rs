//! Quantile binning of a numeric feature against a target
//!
//! Training mode (`fit_bins`) derives cut points from the feature's quantiles
//! and summarizes every bin. Reuse mode (`apply_bins`) applies previously
//! fitted cut points to another dataset so train and test bins line up.

use polars::prelude::*;
use serde::Serialize;

use super::error::BinningError;
use super::stats::{nan_mean, nan_min_max, quantile_sorted, sentinel_below};
use crate::utils::print_warning;

/// Label of the synthetic row holding rows with a missing feature value
pub const NULL_LABEL: &str = "Nulls";

/// Strictly increasing bin boundaries.
///
/// `n` boundaries define `n - 1` right-closed intervals `(b[i-1], b[i]]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CutPoints(Vec<f64>);

impl CutPoints {
    /// Validate and wrap a boundary sequence
    pub fn new(bounds: Vec<f64>) -> Result<Self, BinningError> {
        let increasing = bounds.windows(2).all(|w| w[0] < w[1]);
        if bounds.len() < 2 || !increasing || bounds.iter().any(|b| !b.is_finite()) {
            return Err(BinningError::InvalidCutPoints(bounds));
        }
        Ok(Self(bounds))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of intervals defined by these boundaries
    pub fn num_bins(&self) -> usize {
        self.0.len() - 1
    }

    /// Index of the interval a value falls in.
    ///
    /// Values at or below the first boundary go to the first interval and
    /// values above the last boundary go to the last one.
    fn bin_index(&self, value: f64) -> usize {
        let idx = self.0.partition_point(|&b| b < value);
        idx.saturating_sub(1).min(self.num_bins() - 1)
    }
}

/// What a summary row represents
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BinKind {
    /// Rows whose feature value is null or NaN
    Nulls,
    /// Right-closed interval `(lower, upper]`
    Interval { lower: f64, upper: f64 },
}

/// Aggregated statistics for one bin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSummaryRow {
    /// Display label, e.g. `"(10.9, 20.8]"` or `"Nulls"`
    pub label: String,
    /// Number of rows in the bin
    pub samples: usize,
    /// Mean of the target over the bin (NaN when the bin has no target values)
    pub target_mean: f64,
    /// Mean of the feature over the bin (NaN for the null bin and empty bins)
    pub feature_mean: f64,
    pub kind: BinKind,
}

impl BinSummaryRow {
    pub fn is_null_bin(&self) -> bool {
        matches!(self.kind, BinKind::Nulls)
    }
}

/// Ordered per-bin summary of a feature: null bin first, then intervals ascending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinSummary {
    pub feature: String,
    pub target: String,
    rows: Vec<BinSummaryRow>,
}

impl BinSummary {
    pub fn new(feature: impl Into<String>, target: impl Into<String>, rows: Vec<BinSummaryRow>) -> Self {
        Self {
            feature: feature.into(),
            target: target.into(),
            rows,
        }
    }

    pub fn rows(&self) -> &[BinSummaryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The null bin, if the dataset had missing feature values
    pub fn null_row(&self) -> Option<&BinSummaryRow> {
        self.rows.iter().find(|r| r.is_null_bin())
    }

    /// Interval rows in ascending order, excluding the null bin
    pub fn interval_rows(&self) -> impl Iterator<Item = &BinSummaryRow> {
        self.rows.iter().filter(|r| !r.is_null_bin())
    }

    /// Total number of rows across all bins, null bin included
    pub fn total_samples(&self) -> usize {
        self.rows.iter().map(|r| r.samples).sum()
    }

    /// Copy of this summary without the null bin
    pub fn without_nulls(&self) -> BinSummary {
        BinSummary::new(
            self.feature.clone(),
            self.target.clone(),
            self.interval_rows().cloned().collect(),
        )
    }

    /// Copy of this summary with the first interval row relabelled
    pub fn with_first_label(&self, label: impl Into<String>) -> BinSummary {
        let label = label.into();
        let mut replaced = false;
        let rows = self
            .rows
            .iter()
            .map(|row| {
                if !replaced && !row.is_null_bin() {
                    replaced = true;
                    BinSummaryRow {
                        label: label.clone(),
                        ..row.clone()
                    }
                } else {
                    row.clone()
                }
            })
            .collect();
        BinSummary::new(self.feature.clone(), self.target.clone(), rows)
    }
}

/// Result of training-mode binning
#[derive(Debug, Clone)]
pub struct FittedBins {
    pub cut_points: CutPoints,
    pub summary: BinSummary,
}

/// Bin a feature using quantile cut points derived from `df`.
///
/// Boundaries are the `i / bin_count` quantiles of the non-null feature values,
/// preceded by a sentinel below the minimum (normally `min - 1`) so the
/// minimum itself is covered. Repeated boundaries are dropped, which reduces
/// the number of bins for features with little variation.
///
/// # Errors
/// Fails if a column is missing or non-numeric, if `bin_count` is zero, or if
/// the frame is empty or the feature has no non-null values.
pub fn fit_bins(
    df: &DataFrame,
    feature: &str,
    target: &str,
    bin_count: usize,
) -> Result<FittedBins, BinningError> {
    if bin_count == 0 {
        return Err(BinningError::InvalidBinCount(bin_count));
    }

    let observations = Observations::from_frame(df, feature, target)?;
    let mut sorted: Vec<f64> = observations.present.iter().map(|(v, _)| *v).collect();
    if sorted.is_empty() {
        return Err(BinningError::NoNonNullValues(feature.to_string()));
    }
    sorted.sort_unstable_by(f64::total_cmp);

    let min = sorted[0];
    let mut prev_cut = sentinel_below(min);
    let mut bounds = vec![prev_cut];
    let mut reduced_cuts = 0usize;

    for i in 1..=bin_count {
        let next_cut = quantile_sorted(&sorted, i as f64 / bin_count as f64).unwrap_or(prev_cut);
        if next_cut > prev_cut {
            bounds.push(next_cut);
        } else {
            reduced_cuts += 1;
        }
        prev_cut = next_cut;
    }

    if reduced_cuts > 0 {
        print_warning("Reduced the number of bins due to less variation in feature");
    }

    let cut_points = CutPoints::new(bounds)?;
    let summary = observations.summarize(&cut_points, feature, target);

    Ok(FittedBins {
        cut_points,
        summary,
    })
}

/// Bin a feature in `df` using cut points fitted on another dataset.
///
/// Every row is counted: values outside the fitted range land in the outermost
/// intervals and missing values in the null bin.
pub fn apply_bins(
    df: &DataFrame,
    feature: &str,
    target: &str,
    cut_points: &CutPoints,
) -> Result<BinSummary, BinningError> {
    let observations = Observations::from_frame(df, feature, target)?;
    Ok(observations.summarize(cut_points, feature, target))
}

/// Feature/target pairs split by whether the feature is present
struct Observations {
    /// (feature, target) for rows with a feature value
    present: Vec<(f64, Option<f64>)>,
    /// Targets of rows with a missing feature value
    null_targets: Vec<Option<f64>>,
}

impl Observations {
    fn from_frame(df: &DataFrame, feature: &str, target: &str) -> Result<Self, BinningError> {
        let feature_values = numeric_values(df, feature, false)?;
        let target_values = numeric_values(df, target, true)?;

        if df.height() == 0 {
            return Err(BinningError::EmptyDataset);
        }

        let mut present = Vec::with_capacity(feature_values.len());
        let mut null_targets = Vec::new();

        for (value, target_value) in feature_values.into_iter().zip(target_values) {
            match value {
                Some(v) => present.push((v, target_value)),
                None => null_targets.push(target_value),
            }
        }

        Ok(Self {
            present,
            null_targets,
        })
    }

    fn summarize(&self, cut_points: &CutPoints, feature: &str, target: &str) -> BinSummary {
        let num_bins = cut_points.num_bins();
        let bounds = cut_points.as_slice();

        let mut samples = vec![0usize; num_bins];
        let mut feature_sums = vec![0.0f64; num_bins];
        let mut target_sums = vec![0.0f64; num_bins];
        let mut target_counts = vec![0usize; num_bins];

        for &(value, target_value) in &self.present {
            let idx = cut_points.bin_index(value);
            samples[idx] += 1;
            feature_sums[idx] += value;
            if let Some(t) = target_value {
                target_sums[idx] += t;
                target_counts[idx] += 1;
            }
        }

        let mut rows = Vec::with_capacity(num_bins + 1);

        if !self.null_targets.is_empty() {
            rows.push(BinSummaryRow {
                label: NULL_LABEL.to_string(),
                samples: self.null_targets.len(),
                target_mean: nan_mean(self.null_targets.iter().flatten().copied()),
                feature_mean: f64::NAN,
                kind: BinKind::Nulls,
            });
        }

        for i in 0..num_bins {
            let (lower, upper) = (bounds[i], bounds[i + 1]);
            rows.push(BinSummaryRow {
                label: interval_label(lower, upper),
                samples: samples[i],
                target_mean: ratio(target_sums[i], target_counts[i]),
                feature_mean: ratio(feature_sums[i], samples[i]),
                kind: BinKind::Interval { lower, upper },
            });
        }

        let summary = BinSummary::new(feature, target, rows);

        // Show the true minimum instead of the sentinel lower bound
        match nan_min_max(self.present.iter().map(|(v, _)| *v)) {
            Some((min, _)) => {
                let label = format!("[{}, {}]", format_bound(min), format_bound(bounds[1]));
                summary.with_first_label(label)
            }
            None => summary,
        }
    }
}

/// Extract a column as `f64`, mapping null and NaN to `None`
fn numeric_values(
    df: &DataFrame,
    name: &str,
    allow_bool: bool,
) -> Result<Vec<Option<f64>>, BinningError> {
    let column = df
        .column(name)
        .map_err(|_| BinningError::ColumnNotFound(name.to_string()))?;

    let dtype = column.dtype();
    if !(dtype.is_primitive_numeric() || (allow_bool && dtype.is_bool())) {
        return Err(BinningError::NonNumericColumn {
            name: name.to_string(),
            dtype: dtype.to_string(),
        });
    }

    let float_col = column.cast(&DataType::Float64)?;
    Ok(float_col
        .f64()?
        .iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn ratio(sum: f64, count: usize) -> f64 {
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

fn interval_label(lower: f64, upper: f64) -> String {
    format!("({}, {}]", format_bound(lower), format_bound(upper))
}

/// Format a boundary the way it reads in a label (`10.0`, `10.9`, `-0.5`)
fn format_bound(value: f64) -> String {
    format!("{:?}", value)
}
