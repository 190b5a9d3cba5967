//! Plain-text rendering of a view.
//!
//! We keep formatting code in one place so:
//! - the aggregation/selector code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::charts::{BarSpec, ChartSpec, LineSpec, PieSpec};
use crate::domain::{DatasetStats, ReportSelection};
use crate::view::ViewModel;

/// Format the full report: selection, dataset line, then every chart.
pub fn format_report(view: &ViewModel, stats: &DatasetStats, selection: &ReportSelection) -> String {
    let mut out = String::new();

    out.push_str("=== Automobile Sales Statistics ===\n");
    out.push_str(&format!(
        "Report: {}\n",
        selection
            .mode
            .map(|m| m.display_name())
            .unwrap_or("(none selected)")
    ));
    out.push_str(&format!(
        "Year: {}\n",
        selection.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
    ));
    out.push_str(&format!(
        "Dataset: {} rows | years {}-{} | recession rows: {} | vehicle types: {}\n",
        stats.n_rows, stats.year_min, stats.year_max, stats.recession_rows, stats.vehicle_types
    ));
    out.push('\n');

    if view.charts.is_empty() {
        out.push_str("No charts for this selection. Choose a report mode; yearly statistics also need a year.\n");
        return out;
    }

    for chart in &view.charts {
        out.push_str(&format_chart(chart));
        out.push('\n');
    }

    out
}

/// Format one chart as a titled table.
pub fn format_chart(spec: &ChartSpec) -> String {
    match spec {
        ChartSpec::Line(line) => format_line(line),
        ChartSpec::Bar(bar) => format_bar(bar),
        ChartSpec::Pie(pie) => format_pie(pie),
    }
}

fn format_line(spec: &LineSpec) -> String {
    let mut out = format!("[line] {}\n", spec.title);
    out.push_str(&format!("{:<16} {:>16}\n", spec.x_label, spec.y_label));
    out.push_str(&format!("{:-<16} {:-<16}\n", "", ""));
    for p in &spec.points {
        out.push_str(&format!("{:<16} {:>16.2}\n", truncate(&p.label, 16), p.y));
    }
    out
}

fn format_bar(spec: &BarSpec) -> String {
    let mut out = format!("[bar] {}\n", spec.title);
    match &spec.color_label {
        Some(color) => {
            out.push_str(&format!(
                "{:<16} {:<16} {:>16}\n",
                spec.x_label, color, spec.y_label
            ));
            out.push_str(&format!("{:-<16} {:-<16} {:-<16}\n", "", "", ""));
            for b in &spec.bars {
                out.push_str(&format!(
                    "{:<16} {:<16} {:>16.2}\n",
                    truncate(&b.label, 16),
                    truncate(b.series.as_deref().unwrap_or(""), 16),
                    b.value
                ));
            }
        }
        None => {
            out.push_str(&format!("{:<16} {:>16}\n", spec.x_label, spec.y_label));
            out.push_str(&format!("{:-<16} {:-<16}\n", "", ""));
            for b in &spec.bars {
                out.push_str(&format!("{:<16} {:>16.2}\n", truncate(&b.label, 16), b.value));
            }
        }
    }
    out
}

fn format_pie(spec: &PieSpec) -> String {
    let total: f64 = spec.slices.iter().map(|s| s.value).sum();

    let mut out = format!("[pie] {}\n", spec.title);
    out.push_str(&format!(
        "{:<16} {:>16} {:>8}\n",
        spec.names_label, spec.values_label, "share"
    ));
    out.push_str(&format!("{:-<16} {:-<16} {:-<8}\n", "", "", ""));
    for s in &spec.slices {
        let share = if total > 0.0 { s.value / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "{:<16} {:>16.2} {:>7.1}%\n",
            truncate(&s.name, 16),
            s.value,
            share
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
