//! Export a rendered view's chart data to CSV.
//!
//! The export is one flat table (one row per chart datum), meant to be easy
//! to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::charts::ChartSpec;
use crate::error::AppError;
use crate::view::ViewModel;

/// Write the view's chart data to a CSV file.
pub fn write_view_csv(path: &Path, view: &ViewModel) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_rows(&mut file, view).map_err(|e| {
        AppError::usage(format!("Failed to write export CSV '{}': {e}", path.display()))
    })
}

fn write_rows<W: Write>(w: &mut W, view: &ViewModel) -> io::Result<()> {
    writeln!(w, "chart,kind,title,label,series,value")?;

    for (idx, spec) in view.charts.iter().enumerate() {
        let chart = idx + 1;
        match spec {
            ChartSpec::Line(line) => {
                for p in &line.points {
                    writeln!(w, "{chart},line,{},{},,{:.4}", line.title, p.label, p.y)?;
                }
            }
            ChartSpec::Bar(bar) => {
                for b in &bar.bars {
                    writeln!(
                        w,
                        "{chart},bar,{},{},{},{:.4}",
                        bar.title,
                        b.label,
                        b.series.as_deref().unwrap_or(""),
                        b.value
                    )?;
                }
            }
            ChartSpec::Pie(pie) => {
                for s in &pie.slices {
                    writeln!(w, "{chart},pie,{},{},,{:.4}", pie.title, s.name, s.value)?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{LinePoint, LineSpec, PieSlice, PieSpec};

    #[test]
    fn rows_are_flat_and_numbered_per_chart() {
        let view = ViewModel {
            year_selector_hidden: true,
            charts: vec![
                ChartSpec::Line(LineSpec {
                    title: "Sales".to_string(),
                    x_label: "Year".to_string(),
                    y_label: "Automobile_Sales".to_string(),
                    points: vec![LinePoint {
                        label: "2000".to_string(),
                        x: 2000.0,
                        y: 10.0,
                    }],
                }),
                ChartSpec::Pie(PieSpec {
                    title: "Share".to_string(),
                    names_label: "Vehicle_Type".to_string(),
                    values_label: "Total_Expenditure".to_string(),
                    slices: vec![PieSlice {
                        name: "Sedan".to_string(),
                        value: 200_000.0,
                    }],
                }),
            ],
        };

        let mut buf = Vec::new();
        write_rows(&mut buf, &view).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "chart,kind,title,label,series,value");
        assert_eq!(lines[1], "1,line,Sales,2000,,10.0000");
        assert_eq!(lines[2], "2,pie,Share,Sedan,,200000.0000");
    }
}
