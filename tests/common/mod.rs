//! Shared test utilities and fixture generators

#![allow(dead_code)]

use anyhow::Result;
use featrend::pipeline::BinSummary;
use featrend::render::{ChartRenderer, DatasetRole, TrendChart};
use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Feature values 1..=100 plus one null, with target = feature > 50
///
/// The null row has target 1.
pub fn create_hundred_dataframe() -> DataFrame {
    let mut feature: Vec<Option<f64>> = (1..=100).map(|v| Some(v as f64)).collect();
    feature.push(None);
    let mut target: Vec<i32> = (1..=100).map(|v| i32::from(v > 50)).collect();
    target.push(1);

    df! {
        "feature" => feature,
        "target" => target,
    }
    .unwrap()
}

/// A train/test pair where the test set follows the same increasing trend
pub fn create_train_test_dataframes() -> (DataFrame, DataFrame) {
    let train = df! {
        "x" => (1..=40).map(|v| v as f64).collect::<Vec<_>>(),
        "noise" => (1..=40).map(|v| ((v * 7) % 11) as f64).collect::<Vec<_>>(),
        "target" => (1..=40).map(|v| v as f64 / 40.0).collect::<Vec<_>>(),
    }
    .unwrap();

    // Shifted slightly so the minimum differs from train
    let test = df! {
        "x" => (1..=40).map(|v| v as f64 + 0.5).collect::<Vec<_>>(),
        "noise" => (1..=40).map(|v| ((v * 3) % 13) as f64).collect::<Vec<_>>(),
        "target" => (1..=40).map(|v| (v as f64 + 0.5) / 40.0).collect::<Vec<_>>(),
    }
    .unwrap();

    (train, test)
}

/// Create a larger random DataFrame for stress tests
pub fn create_large_test_dataframe(rows: usize, cols: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let target: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("target".into(), target));

    for i in 0..cols {
        let values: Vec<Option<f64>> = (0..rows)
            .map(|_| {
                if rng.gen::<f64>() < 0.05 {
                    None
                } else {
                    Some(rng.gen::<f64>() * 100.0)
                }
            })
            .collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Float equality where NaN equals NaN
pub fn same_float(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12
}

/// Assert two summaries have identical rows, treating NaN means as equal
pub fn assert_summaries_equal(actual: &BinSummary, expected: &BinSummary) {
    assert_eq!(actual.len(), expected.len(), "Row count mismatch");
    for (a, e) in actual.rows().iter().zip(expected.rows()) {
        assert_eq!(a.label, e.label);
        assert_eq!(a.samples, e.samples, "Samples mismatch in bin {}", a.label);
        assert_eq!(a.kind, e.kind);
        assert!(
            same_float(a.target_mean, e.target_mean),
            "Target mean mismatch in bin {}: {} vs {}",
            a.label,
            a.target_mean,
            e.target_mean
        );
        assert!(
            same_float(a.feature_mean, e.feature_mean),
            "Feature mean mismatch in bin {}: {} vs {}",
            a.label,
            a.feature_mean,
            e.feature_mean
        );
    }
}

/// What a recording renderer saw for one chart
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub feature: String,
    pub dataset: DatasetRole,
    pub rows: usize,
    pub trend_changes: usize,
    pub trend_correlation: Option<f64>,
    pub annotation: Vec<String>,
}

/// Renderer that records every chart it is asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub charts: Vec<RenderedChart>,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, chart: &TrendChart<'_>) -> Result<()> {
        self.charts.push(RenderedChart {
            feature: chart.summary.feature.clone(),
            dataset: chart.dataset,
            rows: chart.summary.len(),
            trend_changes: chart.trend_changes,
            trend_correlation: chart.trend_correlation,
            annotation: chart.annotation(),
        });
        Ok(())
    }
}
