//! Error types for binning and trend analysis.

use thiserror::Error;

/// Errors raised while binning a feature against a target.
#[derive(Debug, Error)]
pub enum BinningError {
    /// The requested column is not present in the DataFrame.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The column exists but cannot be binned or averaged.
    #[error("Column '{name}' must be numeric, found {dtype}")]
    NonNumericColumn { name: String, dtype: String },

    /// Training-mode binning needs at least one bin.
    #[error("Number of bins must be positive, got {0}")]
    InvalidBinCount(usize),

    /// The input DataFrame has no rows.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Every value of the feature is null or NaN, so no cut points exist.
    #[error("Feature '{0}' has no non-null values to bin")]
    NoNonNullValues(String),

    /// Supplied cut points cannot define at least one interval.
    #[error("Cut points must contain at least two strictly increasing values, got {0:?}")]
    InvalidCutPoints(Vec<f64>),

    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}
