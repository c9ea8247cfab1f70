//! JSON export of trend analyses

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{TrendStats, UnivariateAnalysis};

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Featrend version
    pub featrend_version: String,
    /// Training data file
    pub train_file: String,
    /// Test data file (if used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_file: Option<String>,
    /// Target column name
    pub target_column: String,
    /// Requested number of bins
    pub num_bins: usize,
    /// Flat-step threshold used for trend changes
    pub trend_threshold: f64,
}

/// Parameters describing the run, used for the metadata block
pub struct ExportParams<'a> {
    pub train_file: &'a str,
    pub test_file: Option<&'a str>,
    pub target_column: &'a str,
    pub num_bins: usize,
    pub trend_threshold: f64,
}

/// Complete export: metadata, the per-feature stats and the bin detail
#[derive(Serialize)]
pub struct TrendExport<'a> {
    pub metadata: ExportMetadata,
    pub stats: Vec<TrendStats>,
    pub features: &'a [UnivariateAnalysis],
}

/// Build the export structure without writing it
pub fn build_export<'a>(analyses: &'a [UnivariateAnalysis], params: &ExportParams) -> TrendExport<'a> {
    TrendExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            featrend_version: env!("CARGO_PKG_VERSION").to_string(),
            train_file: params.train_file.to_string(),
            test_file: params.test_file.map(|s| s.to_string()),
            target_column: params.target_column.to_string(),
            num_bins: params.num_bins,
            trend_threshold: params.trend_threshold,
        },
        stats: analyses.iter().map(TrendStats::from).collect(),
        features: analyses,
    }
}

/// Export analyses to a JSON file.
///
/// Undefined means (the null bin's feature mean, empty bins) are written as
/// `null`.
pub fn export_analyses(
    analyses: &[UnivariateAnalysis],
    output_path: &Path,
    params: &ExportParams,
) -> Result<()> {
    let export = build_export(analyses, params);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize trend analysis to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write trend analysis to {}", output_path.display()))?;

    Ok(())
}

/// Export trend stats only (no bin detail) to a JSON file
pub fn export_trend_stats(stats: &[TrendStats], output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(stats)
        .context("Failed to serialize trend stats to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write trend stats to {}", output_path.display()))?;

    Ok(())
}
