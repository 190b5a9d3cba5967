//! Declarative chart specifications.
//!
//! `build_charts` maps each summary table to exactly one chart spec; it does
//! no computation of its own. The specs are the boundary between the pipeline
//! and whatever renders them (the TUI widgets, the text reports, or a view
//! JSON consumed elsewhere), so they are plain serializable data.

use serde::{Deserialize, Serialize};

use crate::domain::{GroupKey, ReportMode, ReportSelection, SummaryTable};

/// A renderable chart: kind + title + axis bindings + data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ChartSpec {
    Line(LineSpec),
    Bar(BarSpec),
    Pie(PieSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(s) => &s.title,
            ChartSpec::Bar(s) => &s.title,
            ChartSpec::Pie(s) => &s.title,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ChartSpec::Line(_) => "line",
            ChartSpec::Bar(_) => "bar",
            ChartSpec::Pie(_) => "pie",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<LinePoint>,
}

/// One line-chart point. `x` positions the point (the key's numeric value,
/// or its ordinal for categorical keys); `label` is what ticks display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Name of the color dimension, when bars are colored by a series.
    pub color_label: Option<String>,
    pub bars: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarPoint {
    pub label: String,
    /// Series value driving the bar color (e.g. the vehicle type).
    pub series: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSpec {
    pub title: String,
    pub names_label: String,
    pub values_label: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

/// Map summary tables to chart specs, one-to-one.
///
/// The kind/title assignment is fixed per report mode; an incomplete
/// selection has no summaries and therefore no charts.
pub fn build_charts(selection: &ReportSelection, summaries: &[SummaryTable]) -> Vec<ChartSpec> {
    match (selection.mode, summaries) {
        (Some(ReportMode::Recession), [by_year, by_type, expenditure, raw]) => vec![
            ChartSpec::Line(line(
                "Average Automobile Sales fluctuation over Recession Period",
                by_year,
            )),
            ChartSpec::Line(line("Average Number of Vehicles Sold by Vehicle Type", by_type)),
            ChartSpec::Pie(pie("Total Expenditure Share by Vehicle Type", expenditure)),
            ChartSpec::Bar(bar(
                "Automobile Sales by Unemployment Rate per Vehicle Type",
                raw,
            )),
        ],
        (Some(ReportMode::Yearly), [by_year, by_month, month_in_year, advertising]) => {
            // The selection is complete by construction when four yearly
            // summaries exist.
            let year = selection.year.unwrap_or_default();
            vec![
                ChartSpec::Line(line("Yearly Automobile Sales", by_year)),
                ChartSpec::Line(line("Total Monthly Automobile Sales", by_month)),
                ChartSpec::Bar(bar(
                    &format!("Total Monthly Automobile Sales in {year}"),
                    month_in_year,
                )),
                ChartSpec::Pie(pie(
                    &format!("Advertising Expenditure by Vehicle Type in {year}"),
                    advertising,
                )),
            ]
        }
        _ => Vec::new(),
    }
}

fn line(title: &str, summary: &SummaryTable) -> LineSpec {
    let points = summary
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| LinePoint {
            label: row.key.to_string(),
            x: numeric_key(&row.key).unwrap_or(idx as f64),
            y: row.value,
        })
        .collect();

    LineSpec {
        title: title.to_string(),
        x_label: summary.dimension.to_string(),
        y_label: summary.measure.to_string(),
        points,
    }
}

fn bar(title: &str, summary: &SummaryTable) -> BarSpec {
    let color_label = summary
        .rows
        .iter()
        .any(|r| r.series.is_some())
        .then(|| "Vehicle_Type".to_string());

    let bars = summary
        .rows
        .iter()
        .map(|row| BarPoint {
            label: row.key.to_string(),
            series: row.series.clone(),
            value: row.value,
        })
        .collect();

    BarSpec {
        title: title.to_string(),
        x_label: summary.dimension.to_string(),
        y_label: summary.measure.to_string(),
        color_label,
        bars,
    }
}

fn pie(title: &str, summary: &SummaryTable) -> PieSpec {
    let slices = summary
        .rows
        .iter()
        .map(|row| PieSlice {
            name: row.key.to_string(),
            value: row.value,
        })
        .collect();

    PieSpec {
        title: title.to_string(),
        names_label: summary.dimension.to_string(),
        values_label: summary.measure.to_string(),
        slices,
    }
}

fn numeric_key(key: &GroupKey) -> Option<f64> {
    match key {
        GroupKey::Year(y) => Some(*y as f64),
        GroupKey::Rate(r) => Some(*r),
        GroupKey::Label(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agg::aggregate;
    use crate::domain::{ReportSelection, SalesRecord, SalesTable};

    fn sample_table() -> SalesTable {
        let mut rows = Vec::new();
        for (year, month, vt, sales) in [
            (2000, "Jan", "Sedan", 10.0),
            (2000, "Feb", "Truck", 5.0),
            (2001, "Jan", "Sports", 7.0),
        ] {
            rows.push(SalesRecord {
                year,
                month: month.to_string(),
                vehicle_type: vt.to_string(),
                automobile_sales: sales,
                price: 10_000.0,
                advertising_expenditure: 50.0,
                unemployment_rate: 5.0,
                recession: true,
            });
        }
        SalesTable::new(rows).unwrap()
    }

    #[test]
    fn recession_charts_are_line_line_pie_bar() {
        let table = sample_table();
        let selection = ReportSelection::recession();
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let kinds: Vec<&str> = charts.iter().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, ["line", "line", "pie", "bar"]);
    }

    #[test]
    fn yearly_charts_are_line_line_bar_pie_with_year_in_titles() {
        let table = sample_table();
        let selection = ReportSelection::yearly(2000);
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let kinds: Vec<&str> = charts.iter().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, ["line", "line", "bar", "pie"]);
        assert!(charts[2].title().ends_with("in 2000"));
        assert!(charts[3].title().ends_with("in 2000"));
    }

    #[test]
    fn empty_summaries_build_no_charts() {
        let selection = ReportSelection::new(None, None);
        assert!(build_charts(&selection, &[]).is_empty());
    }

    #[test]
    fn line_points_use_year_values_on_the_x_axis() {
        let table = sample_table();
        let selection = ReportSelection::recession();
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let ChartSpec::Line(spec) = &charts[0] else {
            panic!("expected a line chart");
        };
        assert_eq!(spec.x_label, "Year");
        assert!((spec.points[0].x - 2000.0).abs() < 1e-12);
        assert_eq!(spec.points[0].label, "2000");
    }

    #[test]
    fn categorical_line_points_fall_back_to_ordinals() {
        let table = sample_table();
        let selection = ReportSelection::recession();
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let ChartSpec::Line(spec) = &charts[1] else {
            panic!("expected a line chart");
        };
        assert_eq!(spec.points[0].label, "Sedan");
        assert!((spec.points[0].x - 0.0).abs() < 1e-12);
        assert!((spec.points[1].x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn unemployment_bar_carries_the_color_dimension() {
        let table = sample_table();
        let selection = ReportSelection::recession();
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let ChartSpec::Bar(spec) = &charts[3] else {
            panic!("expected a bar chart");
        };
        assert_eq!(spec.color_label.as_deref(), Some("Vehicle_Type"));
        assert_eq!(spec.bars.len(), 3);
        assert_eq!(spec.bars[0].series.as_deref(), Some("Sedan"));
    }

    #[test]
    fn pie_slices_mirror_the_summary_rows() {
        let table = sample_table();
        let selection = ReportSelection::recession();
        let charts = build_charts(&selection, &aggregate(&table, &selection));

        let ChartSpec::Pie(spec) = &charts[2] else {
            panic!("expected a pie chart");
        };
        assert_eq!(spec.values_label, "Total_Expenditure");
        assert_eq!(spec.slices[0].name, "Sedan");
        assert!((spec.slices[0].value - 100_000.0).abs() < 1e-9);
    }
}
