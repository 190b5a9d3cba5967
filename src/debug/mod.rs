//! Debug bundle writer for inspecting the dataset and summary tables.
//!
//! Bound to the TUI's `d` key: dumps what the pipeline computed for the
//! current selection so chart oddities can be diagnosed outside the
//! terminal UI.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::domain::{ReportSelection, SalesTable};
use crate::error::AppError;

pub fn write_bundle(table: &SalesTable, selection: &ReportSelection) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir)
        .map_err(|e| AppError::runtime(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("autostats_debug_{ts}.md"));

    let mut out = String::new();
    out.push_str("# autostats debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));

    let stats = table.stats();
    out.push_str(&format!("- rows: {}\n", stats.n_rows));
    out.push_str(&format!("- years: {}-{}\n", stats.year_min, stats.year_max));
    out.push_str(&format!("- recession_rows: {}\n", stats.recession_rows));
    out.push_str(&format!("- vehicle_types: {}\n", stats.vehicle_types));
    out.push_str(&format!(
        "- selection: mode={:?} year={:?}\n\n",
        selection.mode, selection.year
    ));

    let summaries = crate::agg::aggregate(table, selection);
    if summaries.is_empty() {
        out.push_str("No summaries for this selection.\n");
    }
    for (idx, summary) in summaries.iter().enumerate() {
        out.push_str(&format!(
            "## summary {}: {} by {}\n",
            idx + 1,
            summary.measure,
            summary.dimension
        ));
        for row in &summary.rows {
            match &row.series {
                Some(series) => {
                    out.push_str(&format!("- {} | {} | {:.4}\n", row.key, series, row.value));
                }
                None => out.push_str(&format!("- {} | {:.4}\n", row.key, row.value)),
            }
        }
        out.push('\n');
    }

    let mut file = File::create(&path)
        .map_err(|e| AppError::runtime(format!("Failed to create debug file: {e}")))?;
    file.write_all(out.as_bytes())
        .map_err(|e| AppError::runtime(format!("Failed to write debug file: {e}")))?;

    Ok(path)
}
