//! Side-by-side SVG charts using plotters

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use plotters::prelude::*;

use super::{ChartRenderer, TrendChart};

const CHART_SIZE: (u32, u32) = (1200, 500);

/// Writes `<feature>_<train|test>.svg` files into an output directory.
///
/// The left panel plots the target mean per bin with markers and the trend
/// annotation; the right panel is a bar chart of samples per bin.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    output_dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SvgRenderer {
    /// Create a renderer writing into `output_dir`, creating it if needed
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("Failed to create plot directory: {}", output_dir.display())
        })?;
        Ok(Self {
            output_dir,
            written: Vec::new(),
        })
    }

    /// Files written so far, in rendering order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn chart_path(&self, chart: &TrendChart<'_>) -> PathBuf {
        let stem: String = chart
            .summary
            .feature
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.output_dir.join(format!("{}_{}.svg", stem, chart.dataset))
    }
}

impl ChartRenderer for SvgRenderer {
    fn render(&mut self, chart: &TrendChart<'_>) -> Result<()> {
        let path = self.chart_path(chart);
        draw_charts(&path, chart)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to render chart: {}", path.display()))?;
        self.written.push(path);
        Ok(())
    }
}

fn draw_charts(path: &Path, chart: &TrendChart<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let rows = chart.summary.rows();
    let n = rows.len().max(1);
    let labels: Vec<String> = rows.iter().map(|r| r.label.clone()).collect();
    let label_of = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally(CHART_SIZE.0 / 2);

    // Mean target per bin
    let means: Vec<(usize, f64)> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.target_mean.is_nan())
        .map(|(i, r)| (i, r.target_mean))
        .collect();
    let (y_min, y_max) = padded_range(means.iter().map(|(_, m)| *m));

    let mut line_chart = ChartBuilder::on(&left)
        .margin(20)
        .caption(chart.line_title(), ("sans-serif", 20))
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)?;

    line_chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&label_of)
        .x_desc(format!("Bins of {}", chart.summary.feature))
        .y_desc(format!("Average of {}", chart.summary.target))
        .draw()?;

    let points: Vec<(SegmentValue<usize>, f64)> = means
        .iter()
        .map(|(i, m)| (SegmentValue::CenterOf(*i), *m))
        .collect();
    line_chart.draw_series(LineSeries::new(points.clone(), &BLUE))?;
    line_chart.draw_series(
        points
            .into_iter()
            .map(|p| Circle::new(p, 4, BLUE.filled())),
    )?;

    let text_style = TextStyle::from(("sans-serif", 16).into_font()).color(&BLACK);
    for (i, line) in chart.annotation().iter().enumerate() {
        left.draw_text(line, &text_style, (90, 50 + 20 * i as i32))?;
    }

    // Samples per bin
    let max_samples = rows.iter().map(|r| r.samples).max().unwrap_or(0).max(1) as f64;
    let mut bar_chart = ChartBuilder::on(&right)
        .margin(20)
        .caption(chart.bar_title(), ("sans-serif", 20))
        .x_label_area_size(70)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0.0..max_samples * 1.1)?;

    bar_chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&label_of)
        .x_desc(format!("Bins of {}", chart.summary.feature))
        .y_desc("Bin-wise sample size")
        .draw()?;

    bar_chart.draw_series(rows.iter().enumerate().map(|(i, r)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), r.samples as f64),
            ],
            BLUE.mix(0.5).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Value range with a little headroom so markers are not clipped
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.1 } else { lo.abs().max(1.0) * 0.1 };
    (lo - pad, hi + pad)
}
