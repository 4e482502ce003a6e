//! Terminal rendering of dashboard charts
//!
//! Bar charts draw one horizontal bar per point, scaled to the largest value.
//! Pie charts are drawn as share bars scaled to the total, with percentages.

use console::style;
use std::fmt::Write as _;

use crate::cli::helpers::truncate_str;
use crate::core::{Chart, ChartKind};

/// Widest bar, in cells
pub const BAR_WIDTH: usize = 40;

const LABEL_WIDTH: usize = 20;

/// Number of filled cells for `value` on a scale where `max` fills `width`
fn bar_len(value: i64, max: i64, width: usize) -> usize {
    if max <= 0 || value <= 0 {
        return 0;
    }
    let len = (value as f64 / max as f64 * width as f64).round() as usize;
    // Any non-zero value gets at least one cell
    len.clamp(1, width)
}

/// Share of `value` in `total`, in percent
pub fn percentage(value: i64, total: i64) -> f64 {
    if total <= 0 {
        0.0
    } else {
        value as f64 * 100.0 / total as f64
    }
}

/// Render a chart as text lines, title first
pub fn render_chart(chart: &Chart) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(&chart.title).bold());

    if chart.points.is_empty() {
        let _ = writeln!(out, "  {}", style("(no data)").dim());
        return out;
    }

    let label_width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(chart.label_name.len())
        .min(LABEL_WIDTH);

    let scale = match chart.kind {
        ChartKind::Bar => chart.max_value(),
        ChartKind::Pie => chart.total(),
    };
    let total = chart.total();

    for point in &chart.points {
        let label = truncate_str(&point.label, label_width);
        let bar = "█".repeat(bar_len(point.value, scale, BAR_WIDTH));
        let bar = match chart.kind {
            ChartKind::Bar => style(bar).cyan(),
            ChartKind::Pie => style(bar).magenta(),
        };
        let _ = match chart.kind {
            ChartKind::Bar => writeln!(
                out,
                "  {:<label_width$} {} {}",
                label,
                bar,
                point.value,
                label_width = label_width
            ),
            ChartKind::Pie => writeln!(
                out,
                "  {:<label_width$} {} {} ({:.1}%)",
                label,
                bar,
                point.value,
                percentage(point.value, total),
                label_width = label_width
            ),
        };
    }

    let _ = writeln!(
        out,
        "  {}",
        style(format!("{} by {}", chart.value_name, chart.label_name)).dim()
    );
    out
}
