//! Featrend: Univariate Feature Trend CLI Tool
//!
//! A command-line tool for binning features against a target, counting trend
//! reversals, and checking train trends against test data.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;

use featrend::cli::{confirm_feature_count, select_target_column, Cli};
use featrend::pipeline::{
    analyze_features, get_column_names, get_trend_stats, load_dataset_with_progress,
    numeric_features, TrendStats,
};
use featrend::render::{ChartRenderer, TerminalRenderer};
use featrend::report::{display_trend_stats, export_analyses, export_trend_stats, ExportParams};
use featrend::utils::{
    print_banner, print_completion, print_config, print_count, print_info, print_step_header,
    print_success,
};

/// Above this many features the user is asked before charting them all
const CONFIRM_FEATURE_COUNT: usize = 10;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Target is required in non-interactive mode
    let target = match (&cli.target, cli.no_confirm) {
        (Some(target), _) => target.clone(),
        (None, true) => anyhow::bail!(
            "Target column is required when using --no-confirm. Use -t/--target to specify."
        ),
        (None, false) => {
            let columns = get_column_names(&cli.input, cli.infer_schema_length)?;
            select_target_column(&columns)?
        }
    };

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        &cli.input,
        cli.test.as_deref(),
        &target,
        cli.bins,
        cli.trend_threshold,
    );

    // Step 1: Load datasets
    print_step_header(1, "Load Data");
    let step_start = Instant::now();

    let train = load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;
    ensure_column(&train, &target, "training")?;

    let test = match &cli.test {
        Some(path) => {
            let df = load_dataset_with_progress(path, cli.infer_schema_length)?;
            ensure_column(&df, &target, "test")?;
            Some(df)
        }
        None => None,
    };

    let features = if cli.features.is_empty() {
        numeric_features(&train, &target)
    } else {
        for feature in &cli.features {
            ensure_column(&train, feature, "training")?;
            if let Some(df) = &test {
                ensure_column(df, feature, "test")?;
            }
        }
        cli.features.clone()
    };

    if features.is_empty() {
        anyhow::bail!("No numeric features found besides target '{}'", target);
    }
    print_count("feature(s) to analyze", features.len(), None);
    print_step_time(step_start);

    let options = cli.analysis_options();

    if cli.stats_only {
        // Step 2: Trend stats only
        print_step_header(2, "Trend Stats");
        let step_start = Instant::now();

        let stats = get_trend_stats(&train, &target, &features, cli.bins, test.as_ref(), &options)?;
        display_trend_stats(&stats);

        if let Some(path) = &cli.export {
            export_trend_stats(&stats, path)?;
            print_success(&format!("Trend stats written to {}", path.display()));
        }
        print_step_time(step_start);
    } else {
        if features.len() > CONFIRM_FEATURE_COUNT
            && !cli.no_confirm
            && !confirm_feature_count(features.len())?
        {
            println!("Cancelled by user.");
            return Ok(());
        }

        // Step 2: Per-feature trend plots
        print_step_header(2, "Univariate Trend Plots");
        let step_start = Instant::now();

        let mut renderer = build_renderer(&cli)?;
        let analyses = analyze_features(
            &features,
            &train,
            &target,
            cli.bins,
            test.as_ref(),
            renderer.as_mut(),
            &options,
        )?;

        let stats: Vec<TrendStats> = analyses.iter().map(TrendStats::from).collect();
        display_trend_stats(&stats);

        if let Some(path) = &cli.export {
            let train_file = cli.input.display().to_string();
            let test_file = cli.test.as_ref().map(|p| p.display().to_string());
            let params = ExportParams {
                train_file: &train_file,
                test_file: test_file.as_deref(),
                target_column: &target,
                num_bins: cli.bins,
                trend_threshold: cli.trend_threshold,
            };
            export_analyses(&analyses, path, &params)?;
            print_success(&format!("Analysis written to {}", path.display()));
        }
        if let Some(dir) = &cli.plot_dir {
            print_info(&format!("Charts saved in {}", dir.display()));
        }
        print_step_time(step_start);
    }

    print_completion();

    Ok(())
}

/// Chart renderer selected by the command line
fn build_renderer(cli: &Cli) -> Result<Box<dyn ChartRenderer>> {
    match &cli.plot_dir {
        #[cfg(feature = "plots")]
        Some(dir) => Ok(Box::new(featrend::render::SvgRenderer::new(dir)?)),
        #[cfg(not(feature = "plots"))]
        Some(_) => anyhow::bail!("--plot-dir requires the 'plots' feature"),
        None => Ok(Box::new(TerminalRenderer::new())),
    }
}

fn ensure_column(df: &DataFrame, column: &str, dataset: &str) -> Result<()> {
    if df.column(column).is_err() {
        let available: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        anyhow::bail!(
            "Column '{}' not found in {} dataset. Available columns: {:?}",
            column,
            dataset,
            available
        );
    }
    Ok(())
}

fn print_step_time(start: Instant) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", start.elapsed().as_secs_f64())).dim()
    );
}
