//! Terminal styling utilities for a modern, visually appealing TUI

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ___          _                      _
    | __|___ __ _| |_ _ _ ___ _ _  __| |
    | _|/ -_) _` |  _| '_/ -_) ' \/ _` |
    |_| \___\__,_|\__|_| \___|_||_\__,_|
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Binned feature trends, train vs test").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(
    input: &Path,
    test: Option<&Path>,
    target: &str,
    bins: usize,
    trend_threshold: f64,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Train:  {:<39}│", FOLDER, truncate_path(input, 38));
    let test_display = test
        .map(|p| truncate_path(p, 38))
        .unwrap_or_else(|| "-".to_string());
    println!("    │  {} Test:   {:<39}│", FOLDER, test_display);
    println!("    │  {} Target: {:<39}│", TARGET, truncate_string(target, 38));
    println!("    ├{}┤", line);
    println!(
        "    │  {} Bins:            {:<30}│",
        CHART,
        style(bins).yellow()
    );
    println!(
        "    │  {} Trend threshold: {:<30}│",
        LINK,
        style(format!("{:.1}%", trend_threshold * 100.0)).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print the heading shown before a feature's charts
pub fn print_feature_header(feature: &str) {
    println!();
    println!(
        "    {} {}",
        CHART,
        style(format!("Plots for {}", feature)).white().bold()
    );
}

/// Print the separator closing a feature's output
pub fn print_separator() {
    println!("    {}", style("─".repeat(74)).dim());
    println!();
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Featrend analysis complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, extra_info: Option<&str>) {
    if let Some(info) = extra_info {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
