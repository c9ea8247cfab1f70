//! Tests for CLI argument parsing and end-to-end runs

use assert_cmd::Command;
use clap::Parser;
use featrend::cli::Cli;
use predicates::prelude::*;
use std::path::PathBuf;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["featrend", "-i", "data.csv", "-t", "target"]);

    assert_eq!(cli.bins, 10, "Default bins should be 10");
    assert_eq!(cli.trend_threshold, 0.03, "Default trend threshold should be 0.03");
    assert!(cli.features.is_empty());
    assert!(cli.test.is_none());
    assert!(cli.plot_dir.is_none());
    assert!(!cli.stats_only);
    assert!(!cli.no_confirm, "Default no_confirm should be false");
    assert_eq!(cli.infer_schema_length, 10000);
}

#[test]
fn test_cli_repeatable_features_and_paths() {
    let cli = Cli::parse_from([
        "featrend",
        "-i",
        "train.parquet",
        "--test",
        "test.parquet",
        "-t",
        "target",
        "-f",
        "age",
        "--feature",
        "income",
        "--bins",
        "5",
        "--trend-threshold",
        "0.1",
        "--plot-dir",
        "charts",
    ]);

    assert_eq!(cli.input, PathBuf::from("train.parquet"));
    assert_eq!(cli.test, Some(PathBuf::from("test.parquet")));
    assert_eq!(cli.features, vec!["age", "income"]);
    assert_eq!(cli.bins, 5);
    assert_eq!(cli.plot_dir, Some(PathBuf::from("charts")));

    let options = cli.analysis_options();
    assert_eq!(options.trend_threshold, 0.1);
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(Cli::try_parse_from(["featrend", "-i", "d.csv", "--bins", "0"]).is_err());
    assert!(Cli::try_parse_from(["featrend", "-i", "d.csv", "--bins", "many"]).is_err());
    assert!(Cli::try_parse_from(["featrend", "-i", "d.csv", "--trend-threshold", "1.5"]).is_err());
    assert!(Cli::try_parse_from(["featrend", "-t", "target"]).is_err(), "input is required");
}

#[test]
fn test_run_stats_only_with_export() {
    let (mut train, mut test) = common::create_train_test_dataframes();
    let (train_dir, train_path) = common::create_temp_csv(&mut train);
    let (_test_dir, test_path) = common::create_temp_csv(&mut test);
    let export_path = train_dir.path().join("stats.json");

    Command::cargo_bin("featrend")
        .unwrap()
        .arg("-i")
        .arg(&train_path)
        .arg("--test")
        .arg(&test_path)
        .args(["-t", "target", "--bins", "4", "--stats-only", "--no-confirm"])
        .arg("--export")
        .arg(&export_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("noise"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[test]
fn test_run_charts_in_terminal() {
    let mut df = common::create_hundred_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("featrend")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .args(["-t", "target", "--no-confirm"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plots for feature"))
        .stdout(predicate::str::contains("Nulls"));
}

#[test]
fn test_run_without_target_fails_non_interactively() {
    let mut df = common::create_hundred_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("featrend")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .arg("--no-confirm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target column is required"));
}

#[test]
fn test_run_with_unknown_feature_fails() {
    let mut df = common::create_hundred_dataframe();
    let (_dir, path) = common::create_temp_csv(&mut df);

    Command::cargo_bin("featrend")
        .unwrap()
        .arg("-i")
        .arg(&path)
        .args(["-t", "target", "-f", "missing", "--no-confirm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
