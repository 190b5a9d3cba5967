//! Chart widgets for the dashboard grid.
//!
//! One render-only widget per `ChartSpec` variant:
//!
//! - line charts go through Plotters (`plotters-ratatui-backend`) for nicer
//!   axis + tick rendering
//! - bar charts use Ratatui's built-in `BarChart`
//! - pie charts become a colored share list (a real pie is unreadable at
//!   terminal cell resolution)
//!
//! All data and bounds come from the spec; nothing is computed here beyond
//! layout-fitting, so the widgets stay trivially disposable.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Widget},
};

use crate::charts::{BarSpec, ChartSpec, LineSpec, PieSpec};

/// Palette for series/slice coloring, cycled when there are more entries.
const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

pub struct ChartWidget<'a> {
    pub spec: &'a ChartSpec,
}

impl Widget for ChartWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.spec.title().to_string())
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 12 || inner.height < 4 {
            buf.set_string(
                inner.x,
                inner.y,
                "(resize)",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        match self.spec {
            ChartSpec::Line(spec) => render_line(spec, inner, buf),
            ChartSpec::Bar(spec) => render_bar(spec, inner, buf),
            ChartSpec::Pie(spec) => render_pie(spec, inner, buf),
        }
    }
}

fn render_line(spec: &LineSpec, area: Rect, buf: &mut Buffer) {
    if spec.points.is_empty() {
        render_empty(area, buf);
        return;
    }

    let Some(([x0, x1], [y0, y1])) = line_bounds(spec) else {
        return;
    };

    let points: Vec<(f64, f64)> = spec.points.iter().map(|p| (p.x, p.y)).collect();
    let ticks: Vec<(f64, String)> = spec.points.iter().map(|p| (p.x, p.label.clone())).collect();
    let x_label = spec.x_label.clone();
    let y_label = spec.y_label.clone();

    // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
    // `Canvas` widget, which ultimately writes to the terminal buffer.
    let widget = widget_fn(move |root| {
        let mut chart = ChartBuilder::on(&root)
            .margin(1)
            // Terminal cells are low-res, so keep label areas compact.
            .set_label_area_size(LabelAreaPosition::Left, 7)
            .set_label_area_size(LabelAreaPosition::Bottom, 2)
            .build_cartesian_2d(x0..x1, y0..y1)?;

        // Mesh lines only add clutter at terminal resolution; axes + tick
        // labels are enough for these overview charts.
        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(&x_label)
            .y_desc(&y_label)
            .x_labels(4)
            .y_labels(4)
            .x_label_formatter(&|v| nearest_tick_label(&ticks, *v))
            .y_label_formatter(&|v| fmt_value(*v))
            .label_style(("sans-serif", 10).into_font().color(&WHITE))
            .axis_style(&WHITE)
            .draw()?;

        let line_color = RGBColor(0, 255, 255); // cyan
        chart.draw_series(LineSeries::new(points.iter().copied(), &line_color))?;
        // Overdraw the observations so single-point series stay visible.
        chart.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

        Ok(())
    });

    widget.render(area, buf);
}

fn render_bar(spec: &BarSpec, area: Rect, buf: &mut Buffer) {
    if spec.bars.is_empty() {
        render_empty(area, buf);
        return;
    }

    const BAR_WIDTH: u16 = 5;
    const BAR_GAP: u16 = 1;

    // Render as many bars as the width allows, in spec order.
    let capacity = (area.width / (BAR_WIDTH + BAR_GAP)).max(1) as usize;
    let shown = &spec.bars[..spec.bars.len().min(capacity)];

    let series_order = series_order(spec);
    let scale = bar_scale(shown.iter().map(|b| b.value));

    let bars: Vec<Bar> = shown
        .iter()
        .map(|b| {
            let color = match (&b.series, &series_order) {
                (Some(series), Some(order)) => {
                    let idx = order.iter().position(|s| s == series).unwrap_or(0);
                    SERIES_COLORS[idx % SERIES_COLORS.len()]
                }
                _ => Color::Cyan,
            };
            Bar::default()
                .value((b.value * scale).round().max(0.0) as u64)
                .text_value(fmt_value(b.value))
                .label(Line::from(clip(&b.label, BAR_WIDTH as usize)))
                .style(Style::default().fg(color))
        })
        .collect();

    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .render(area, buf);
}

fn render_pie(spec: &PieSpec, area: Rect, buf: &mut Buffer) {
    if spec.slices.is_empty() {
        render_empty(area, buf);
        return;
    }

    let total: f64 = spec.slices.iter().map(|s| s.value).sum();
    let bar_room = area.width.saturating_sub(26) as usize;

    let mut lines = Vec::new();
    for (idx, slice) in spec.slices.iter().enumerate().take(area.height as usize) {
        let share = if total > 0.0 { slice.value / total } else { 0.0 };
        let color = SERIES_COLORS[idx % SERIES_COLORS.len()];
        let filled = (share * bar_room as f64).round() as usize;

        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::raw(format!("{:<12}", clip(&slice.name, 12))),
            Span::raw(format!("{:>5.1}% ", share * 100.0)),
            Span::styled("█".repeat(filled), Style::default().fg(color)),
        ]));
    }

    Paragraph::new(lines).render(area, buf);
}

fn render_empty(area: Rect, buf: &mut Buffer) {
    Paragraph::new("no data")
        .style(Style::default().fg(Color::DarkGray))
        .render(area, buf);
}

/// Padded plot bounds, or `None` when the data is unusable.
fn line_bounds(spec: &LineSpec) -> Option<([f64; 2], [f64; 2])> {
    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y0, mut y1) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in &spec.points {
        x0 = x0.min(p.x);
        x1 = x1.max(p.x);
        y0 = y0.min(p.y);
        y1 = y1.max(p.y);
    }

    if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
        return None;
    }

    // Degenerate spans (single point, constant series) still need a window.
    if x1 - x0 < 1e-9 {
        x0 -= 0.5;
        x1 += 0.5;
    }
    let y_pad = ((y1 - y0).abs() * 0.05).max(1e-9);
    Some(([x0, x1], [y0 - y_pad, y1 + y_pad]))
}

/// Distinct series names in first-appearance order, if the chart has any.
fn series_order(spec: &BarSpec) -> Option<Vec<String>> {
    if spec.color_label.is_none() {
        return None;
    }
    let mut order: Vec<String> = Vec::new();
    for bar in &spec.bars {
        if let Some(series) = &bar.series {
            if !order.iter().any(|s| s == series) {
                order.push(series.clone());
            }
        }
    }
    Some(order)
}

/// Scale factor mapping f64 bar values onto `BarChart`'s u64 heights while
/// keeping sub-integer differences visible.
fn bar_scale(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, |acc, v| acc.max(v));
    if max > 0.0 { 1000.0 / max } else { 1.0 }
}

/// Tick label: the data label of the nearest point on the x axis.
///
/// Works for both numeric keys (years, rates) and categorical ordinals, so
/// the formatter never shows interpolated positions like `1984.6`.
fn nearest_tick_label(ticks: &[(f64, String)], v: f64) -> String {
    ticks
        .iter()
        .min_by(|a, b| {
            (a.0 - v)
                .abs()
                .partial_cmp(&(b.0 - v).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(_, label)| label.clone())
        .unwrap_or_default()
}

/// Compact value formatting for tick labels and bar captions.
fn fmt_value(v: f64) -> String {
    let abs = v.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{BarPoint, LinePoint};

    #[test]
    fn fmt_value_picks_compact_units() {
        assert_eq!(fmt_value(512.0), "512");
        assert_eq!(fmt_value(1_558.0), "1.6k");
        assert_eq!(fmt_value(27_483.0), "27k");
        assert_eq!(fmt_value(3_200_000.0), "3.2M");
    }

    #[test]
    fn nearest_tick_label_snaps_to_data() {
        let ticks = vec![
            (1980.0, "1980".to_string()),
            (1981.0, "1981".to_string()),
            (1982.0, "1982".to_string()),
        ];
        assert_eq!(nearest_tick_label(&ticks, 1980.4), "1980");
        assert_eq!(nearest_tick_label(&ticks, 1981.6), "1982");
    }

    #[test]
    fn line_bounds_pad_degenerate_spans() {
        let spec = LineSpec {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            points: vec![LinePoint {
                label: "2000".to_string(),
                x: 2000.0,
                y: 10.0,
            }],
        };
        let ([x0, x1], [y0, y1]) = line_bounds(&spec).unwrap();
        assert!(x1 > x0);
        assert!(y1 > y0);
    }

    #[test]
    fn series_order_is_first_appearance() {
        let spec = BarSpec {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            color_label: Some("Vehicle_Type".to_string()),
            bars: vec![
                BarPoint {
                    label: "5.0".to_string(),
                    series: Some("Truck".to_string()),
                    value: 1.0,
                },
                BarPoint {
                    label: "5.1".to_string(),
                    series: Some("Sedan".to_string()),
                    value: 2.0,
                },
                BarPoint {
                    label: "5.2".to_string(),
                    series: Some("Truck".to_string()),
                    value: 3.0,
                },
            ],
        };
        assert_eq!(series_order(&spec).unwrap(), ["Truck", "Sedan"]);
    }

    #[test]
    fn bar_scale_maps_the_max_onto_the_scale_target() {
        let scale = bar_scale([2.0, 4.0].into_iter());
        assert!((4.0 * scale - 1000.0).abs() < 1e-9);
        assert!((bar_scale(std::iter::empty()) - 1.0).abs() < 1e-12);
    }
}
