//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{AnalysisOptions, DEFAULT_BINS, DEFAULT_TREND_THRESHOLD};

/// Featrend - Plot binned feature trends against a target and check them on test data
#[derive(Parser, Debug)]
#[command(name = "featrend")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Training data file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Test data file path (CSV or Parquet), binned with the training cut points
    #[arg(long)]
    pub test: Option<PathBuf>,

    /// Target column name.
    /// If not provided, will be selected interactively from available columns.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Feature to analyze (repeatable). Defaults to every numeric column except the target.
    #[arg(short, long = "feature")]
    pub features: Vec<String>,

    /// Number of quantile bins
    #[arg(long, default_value_t = DEFAULT_BINS, value_parser = validate_bins)]
    pub bins: usize,

    /// Fraction of the target-mean range below which a change between bins is treated as flat
    #[arg(long, default_value_t = DEFAULT_TREND_THRESHOLD, value_parser = validate_trend_threshold)]
    pub trend_threshold: f64,

    /// Directory for SVG charts (<feature>_train.svg, <feature>_test.svg).
    /// Without it, charts are drawn as tables in the terminal.
    #[arg(long)]
    pub plot_dir: Option<PathBuf>,

    /// Write the analysis (bin summaries and trend stats) to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Only compute the trend stats table (no per-feature charts)
    #[arg(long, default_value = "false")]
    pub stats_only: bool,

    /// Skip interactive prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Library options derived from the command line
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            trend_threshold: self.trend_threshold,
            ..AnalysisOptions::default()
        }
    }
}

/// Validator for the bins parameter
fn validate_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of bins", s))?;

    if value == 0 {
        Err("bins must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for the trend_threshold parameter
fn validate_trend_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "trend_threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
