//! Chart rendering for bin summaries
//!
//! The analysis code only builds a [`TrendChart`] and hands it to a
//! [`ChartRenderer`]; where the charts end up is up to the renderer.

#[cfg(feature = "plots")]
mod svg;
mod terminal;

#[cfg(feature = "plots")]
pub use svg::SvgRenderer;
pub use terminal::TerminalRenderer;

use anyhow::Result;
use serde::Serialize;

use crate::pipeline::BinSummary;

/// Which dataset a chart was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetRole {
    Train,
    Test,
}

impl std::fmt::Display for DatasetRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetRole::Train => write!(f, "train"),
            DatasetRole::Test => write!(f, "test"),
        }
    }
}

/// Everything needed to draw the two charts of one summary
#[derive(Debug, Clone)]
pub struct TrendChart<'a> {
    pub summary: &'a BinSummary,
    pub dataset: DatasetRole,
    pub trend_changes: usize,
    /// Correlation with the train trend (test charts only)
    pub trend_correlation: Option<f64>,
}

impl TrendChart<'_> {
    /// Title of the mean-target panel
    pub fn line_title(&self) -> String {
        format!(
            "Average of {} wrt {}",
            self.summary.target, self.summary.feature
        )
    }

    /// Title of the bin-size panel
    pub fn bar_title(&self) -> String {
        format!("Samples in bins of {}", self.summary.feature)
    }

    /// Text box drawn over the mean-target panel
    pub fn annotation(&self) -> Vec<String> {
        let mut lines = vec![format!("Trend changed {} times", self.trend_changes)];
        match self.trend_correlation {
            Some(corr) if corr == 0.0 => {
                lines.push("Correlation with train trend: NA".to_string());
            }
            Some(corr) => {
                lines.push(format!(
                    "Correlation with train trend: {}%",
                    (corr * 100.0).trunc() as i64
                ));
            }
            None => {}
        }
        lines
    }
}

/// Draws the mean-target line chart and the bin-size bar chart of a summary
pub trait ChartRenderer {
    fn render(&mut self, chart: &TrendChart<'_>) -> Result<()>;
}

/// Renderer that draws nothing, for numeric-only runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRenderer;

impl ChartRenderer for NoopRenderer {
    fn render(&mut self, _chart: &TrendChart<'_>) -> Result<()> {
        Ok(())
    }
}
