//! Univariate trend analysis of features against a target
//!
//! Bins the train data, optionally bins test data with the train cut points,
//! measures trend changes and train/test trend correlation, and passes each
//! summary to a chart renderer.

use anyhow::{Context, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

use super::binning::{apply_bins, fit_bins, BinSummary, CutPoints};
use super::correlation::get_trend_correlation;
use super::trend::{get_trend_changes, DEFAULT_TREND_THRESHOLD};
use crate::render::{ChartRenderer, DatasetRole, TrendChart};
use crate::utils::{
    create_progress_bar, finish_with_success, print_feature_header, print_separator, print_warning,
};

/// Default number of quantile bins
pub const DEFAULT_BINS: usize = 10;

/// Tuning shared by all analysis entry points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    /// Fraction of the target-mean range below which a step counts as flat
    pub trend_threshold: f64,
    /// Print per-feature headers and separators
    pub verbose: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            verbose: true,
        }
    }
}

/// Complete train (and optional test) analysis of one feature
#[derive(Debug, Clone, Serialize)]
pub struct UnivariateAnalysis {
    pub feature: String,
    pub cut_points: CutPoints,
    pub train: BinSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<BinSummary>,
    pub train_trend_changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_trend_changes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_correlation: Option<f64>,
}

/// Trend statistics of one feature, without the bin detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendStats {
    pub feature: String,
    pub trend_changes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_changes_test: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_correlation: Option<f64>,
}

impl From<&UnivariateAnalysis> for TrendStats {
    fn from(analysis: &UnivariateAnalysis) -> Self {
        Self {
            feature: analysis.feature.clone(),
            trend_changes: analysis.train_trend_changes,
            trend_changes_test: analysis.test_trend_changes,
            trend_correlation: analysis.trend_correlation,
        }
    }
}

/// Analyze and chart a single feature.
///
/// `data` is always binned in training mode. When `data_test` is given it is
/// binned with the train cut points, the train/test trend correlation is
/// computed, and both charts are rendered (train first); otherwise only the
/// train chart is rendered.
pub fn analyze_feature(
    feature: &str,
    data: &DataFrame,
    target: &str,
    bins: usize,
    data_test: Option<&DataFrame>,
    renderer: &mut dyn ChartRenderer,
    options: &AnalysisOptions,
) -> Result<UnivariateAnalysis> {
    chart_feature(feature, data, target, bins, data_test, renderer, options)?
}

/// Analyze and chart several features in order.
///
/// Features that cannot be binned (e.g. entirely missing) are reported and
/// skipped; rendering failures abort the run.
pub fn analyze_features(
    features: &[String],
    data: &DataFrame,
    target: &str,
    bins: usize,
    data_test: Option<&DataFrame>,
    renderer: &mut dyn ChartRenderer,
    options: &AnalysisOptions,
) -> Result<Vec<UnivariateAnalysis>> {
    let mut analyses = Vec::with_capacity(features.len());

    for feature in features {
        match chart_feature(feature, data, target, bins, data_test, renderer, options)? {
            Ok(analysis) => analyses.push(analysis),
            Err(e) => print_warning(&format!("Skipping '{}': {:#}", feature, e)),
        }
    }

    Ok(analyses)
}

/// Trend changes (and train/test correlation) for many features, no charts.
///
/// Features are processed in parallel; those that cannot be binned are
/// reported and skipped. Results are sorted by feature name.
pub fn get_trend_stats(
    data: &DataFrame,
    target: &str,
    features: &[String],
    bins: usize,
    data_test: Option<&DataFrame>,
    options: &AnalysisOptions,
) -> Result<Vec<TrendStats>> {
    if bins == 0 {
        anyhow::bail!("Number of bins must be positive, got {}", bins);
    }
    if data.column(target).is_err() {
        anyhow::bail!("Target column '{}' not found in dataset", target);
    }
    if let Some(test) = data_test {
        if test.column(target).is_err() {
            anyhow::bail!("Target column '{}' not found in test dataset", target);
        }
    }

    let quiet = AnalysisOptions {
        verbose: false,
        ..*options
    };

    let pb = create_progress_bar(features.len() as u64, "Calculating trend stats");

    let results: Vec<(&String, Result<UnivariateAnalysis>)> = features
        .par_iter()
        .map(|feature| {
            let result = compute_analysis(feature, data, target, bins, data_test, &quiet);
            pb.inc(1);
            (feature, result)
        })
        .collect();

    let mut stats = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (feature, result) in results {
        match result {
            Ok(analysis) => stats.push(TrendStats::from(&analysis)),
            Err(e) => skipped.push(format!("Skipping '{}': {:#}", feature, e)),
        }
    }

    finish_with_success(
        &pb,
        &format!("Analyzed {} of {} features", stats.len(), features.len()),
    );
    for message in &skipped {
        print_warning(message);
    }

    stats.sort_by(|a, b| a.feature.cmp(&b.feature));
    Ok(stats)
}

/// All primitive numeric columns except the target, in frame order
pub fn numeric_features(data: &DataFrame, target: &str) -> Vec<String> {
    data.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric() && col.name() != target)
        .map(|col| col.name().to_string())
        .collect()
}

/// Render the train chart, then the test chart when present
fn render_analysis(analysis: &UnivariateAnalysis, renderer: &mut dyn ChartRenderer) -> Result<()> {
    renderer.render(&TrendChart {
        summary: &analysis.train,
        dataset: DatasetRole::Train,
        trend_changes: analysis.train_trend_changes,
        trend_correlation: None,
    })?;

    if let (Some(test), Some(test_changes)) = (&analysis.test, analysis.test_trend_changes) {
        renderer.render(&TrendChart {
            summary: test,
            dataset: DatasetRole::Test,
            trend_changes: test_changes,
            trend_correlation: analysis.trend_correlation,
        })?;
    }
    Ok(())
}

/// Header, analysis, charts and separator for one feature.
///
/// Binning failures come back in the inner result so callers can decide to
/// skip the feature; rendering failures abort through the outer one.
fn chart_feature(
    feature: &str,
    data: &DataFrame,
    target: &str,
    bins: usize,
    data_test: Option<&DataFrame>,
    renderer: &mut dyn ChartRenderer,
    options: &AnalysisOptions,
) -> Result<Result<UnivariateAnalysis>> {
    if options.verbose {
        print_feature_header(feature);
    }

    let analysis = match compute_analysis(feature, data, target, bins, data_test, options) {
        Ok(analysis) => analysis,
        Err(e) => return Ok(Err(e)),
    };
    render_analysis(&analysis, renderer)?;

    if options.verbose {
        print_separator();
    }

    Ok(Ok(analysis))
}

fn compute_analysis(
    feature: &str,
    data: &DataFrame,
    target: &str,
    bins: usize,
    data_test: Option<&DataFrame>,
    options: &AnalysisOptions,
) -> Result<UnivariateAnalysis> {
    let fitted = fit_bins(data, feature, target, bins)
        .with_context(|| format!("Failed to bin train data for '{}'", feature))?;
    let train_trend_changes = get_trend_changes(&fitted.summary, options.trend_threshold);

    let (test, test_trend_changes, trend_correlation) = match data_test {
        Some(test_df) => {
            let test = apply_bins(test_df, feature, target, &fitted.cut_points)
                .with_context(|| format!("Failed to bin test data for '{}'", feature))?;
            let changes = get_trend_changes(&test, options.trend_threshold);
            let correlation = get_trend_correlation(&fitted.summary, &test);
            (Some(test), Some(changes), Some(correlation))
        }
        None => (None, None, None),
    };

    Ok(UnivariateAnalysis {
        feature: feature.to_string(),
        cut_points: fitted.cut_points,
        train: fitted.summary,
        test,
        train_trend_changes,
        test_trend_changes,
        trend_correlation,
    })
}
