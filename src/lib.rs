//! Featrend: Univariate Feature Trend Library
//!
//! Bins numeric features against a target, counts trend reversals across
//! bins, and checks whether train trends hold on test data.

pub mod cli;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod utils;
