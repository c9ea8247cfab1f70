//! Table-and-bar rendering straight to the terminal

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use super::{ChartRenderer, DatasetRole, TrendChart};

/// Width of the longest bar in the bin-size column
const BAR_WIDTH: usize = 30;

/// Prints each summary as a table with the target mean per bin and a bar
/// proportional to the bin's sample count.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Build the table for a chart without printing it
    pub fn build_table(chart: &TrendChart<'_>) -> Table {
        let rows = chart.summary.rows();
        let max_samples = rows.iter().map(|r| r.samples).max().unwrap_or(0);

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new(format!("Bins of {}", chart.summary.feature)).add_attribute(Attribute::Bold),
            Cell::new(format!("Average of {}", chart.summary.target)).add_attribute(Attribute::Bold),
            Cell::new(format!("Mean {}", chart.summary.feature)).add_attribute(Attribute::Bold),
            Cell::new("Samples").add_attribute(Attribute::Bold),
            Cell::new("Bin-wise sample size").add_attribute(Attribute::Bold),
        ]);

        for row in rows {
            let label_color = if row.is_null_bin() { Color::DarkGrey } else { Color::White };
            table.add_row(vec![
                Cell::new(&row.label).fg(label_color),
                Cell::new(format_mean(row.target_mean))
                    .fg(Color::Cyan)
                    .set_alignment(CellAlignment::Right),
                Cell::new(format_mean(row.feature_mean)).set_alignment(CellAlignment::Right),
                Cell::new(row.samples).set_alignment(CellAlignment::Right),
                Cell::new(bar(row.samples, max_samples)).fg(Color::Blue),
            ]);
        }

        table
    }
}

impl ChartRenderer for TerminalRenderer {
    fn render(&mut self, chart: &TrendChart<'_>) -> Result<()> {
        let heading = match chart.dataset {
            DatasetRole::Train => "Train data plots",
            DatasetRole::Test => "Test data plots",
        };
        println!();
        println!("      {}", style(heading).white().bold());
        println!("      {}", style(chart.line_title()).dim());

        for line in Self::build_table(chart).to_string().lines() {
            println!("      {}", line);
        }

        for line in chart.annotation() {
            println!("      {} {}", style("▸").yellow(), style(line).yellow());
        }
        Ok(())
    }
}

fn format_mean(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{:.4}", value)
    }
}

fn bar(samples: usize, max_samples: usize) -> String {
    if max_samples == 0 {
        return String::new();
    }
    let width = (samples as f64 / max_samples as f64 * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{BinKind, BinSummary, BinSummaryRow};

    #[test]
    fn test_bar_scales_to_largest_bin() {
        assert_eq!(bar(10, 10).chars().count(), BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), BAR_WIDTH / 2);
        assert_eq!(bar(0, 10), "");
        assert_eq!(bar(0, 0), "");
    }

    #[test]
    fn test_table_lists_every_bin() {
        let summary = BinSummary::new(
            "income",
            "churn",
            vec![
                BinSummaryRow {
                    label: "Nulls".to_string(),
                    samples: 3,
                    target_mean: 0.5,
                    feature_mean: f64::NAN,
                    kind: BinKind::Nulls,
                },
                BinSummaryRow {
                    label: "[1.0, 5.0]".to_string(),
                    samples: 6,
                    target_mean: 0.25,
                    feature_mean: 3.0,
                    kind: BinKind::Interval { lower: 0.0, upper: 5.0 },
                },
            ],
        );
        let chart = TrendChart {
            summary: &summary,
            dataset: DatasetRole::Train,
            trend_changes: 0,
            trend_correlation: None,
        };

        let rendered = TerminalRenderer::build_table(&chart).to_string();
        assert!(rendered.contains("Nulls"));
        assert!(rendered.contains("[1.0, 5.0]"));
        assert!(rendered.contains("0.2500"));
        assert!(rendered.contains("Average of churn"));
    }
}
