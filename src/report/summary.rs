//! Trend stats summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::TrendStats;

/// Correlation below which a test trend is flagged as unstable
pub const UNSTABLE_CORRELATION: f64 = 0.5;

/// Build the trend stats table, one row per feature
pub fn trend_stats_table(stats: &[TrendStats]) -> Table {
    let has_test = stats.iter().any(|s| s.trend_correlation.is_some());

    let mut header = vec![
        Cell::new("Feature").add_attribute(Attribute::Bold),
        Cell::new("Trend changes").add_attribute(Attribute::Bold),
    ];
    if has_test {
        header.push(Cell::new("Trend changes (test)").add_attribute(Attribute::Bold));
        header.push(Cell::new("Trend correlation").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header);

    for stat in stats {
        let mut row = vec![
            Cell::new(&stat.feature),
            Cell::new(stat.trend_changes)
                .fg(changes_color(stat.trend_changes))
                .set_alignment(CellAlignment::Right),
        ];

        if has_test {
            row.push(match stat.trend_changes_test {
                Some(changes) => Cell::new(changes)
                    .fg(changes_color(changes))
                    .set_alignment(CellAlignment::Right),
                None => Cell::new("-"),
            });
            row.push(match stat.trend_correlation {
                Some(corr) => Cell::new(format_correlation(corr))
                    .fg(correlation_color(corr))
                    .set_alignment(CellAlignment::Right),
                None => Cell::new("-"),
            });
        }

        table.add_row(row);
    }

    table
}

/// Print the trend stats table under a heading
pub fn display_trend_stats(stats: &[TrendStats]) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("TREND STATS").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    // Indent the table
    for line in trend_stats_table(stats).to_string().lines() {
        println!("    {}", line);
    }

    let unstable: Vec<&str> = stats
        .iter()
        .filter(|s| matches!(s.trend_correlation, Some(c) if c < UNSTABLE_CORRELATION))
        .map(|s| s.feature.as_str())
        .collect();

    if !unstable.is_empty() {
        println!();
        println!(
            "      {} {}:",
            style("Unstable train/test trends").yellow(),
            style(format!("({})", unstable.len())).dim()
        );
        for feature in unstable {
            println!("        {} {}", style("•").dim(), feature);
        }
    }
}

fn format_correlation(corr: f64) -> String {
    if corr == 0.0 {
        "NA".to_string()
    } else {
        format!("{}%", (corr * 100.0).trunc() as i64)
    }
}

fn changes_color(changes: usize) -> Color {
    match changes {
        0 => Color::Green,
        1 => Color::Yellow,
        _ => Color::Red,
    }
}

fn correlation_color(corr: f64) -> Color {
    if corr >= 0.8 {
        Color::Green
    } else if corr >= UNSTABLE_CORRELATION {
        Color::Yellow
    } else {
        Color::Red
    }
}
