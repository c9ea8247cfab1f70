//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use crate::utils::{create_spinner, finish_with_success};

/// Lazily scan a dataset (CSV or Parquet based on extension)
///
/// `infer_schema_length` of 0 means a full table scan for CSV schema inference.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Load a dataset into memory behind a spinner
pub fn load_dataset_with_progress(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let spinner = create_spinner(&format!("Loading {}...", path.display()));
    let df = load_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    let (rows, cols) = df.shape();
    finish_with_success(
        &spinner,
        &format!("Loaded {} ({} rows × {} columns)", path.display(), rows, cols),
    );
    Ok(df)
}

/// Column names of a dataset without loading its rows
pub fn get_column_names(path: &Path, infer_schema_length: usize) -> Result<Vec<String>> {
    let schema = load_dataset(path, infer_schema_length)?
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}
