//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - held in-memory for the process lifetime (the table is loaded once)
//! - recomputed wholesale on every selection change (summaries)
//! - exported to CSV/JSON alongside the chart specifications

use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// First year offered by the year selector.
pub const YEAR_MIN: i32 = 1980;
/// Last year offered by the year selector.
pub const YEAR_MAX: i32 = 2023;

/// One row of the historical automobile sales dataset.
///
/// The source CSV carries more columns (GDP, consumer confidence, city, ...);
/// only the fields the reports consume are kept. Rows are immutable once
/// loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i32,
    /// Month name as it appears in the file (categorical, not parsed).
    pub month: String,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub price: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    /// True for rows inside an economically-defined recession period.
    pub recession: bool,
}

/// Row-count style facts about the loaded table, used by headers and reports.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_rows: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub recession_rows: usize,
    pub vehicle_types: usize,
}

/// The dataset, loaded once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct SalesTable {
    records: Vec<SalesRecord>,
    stats: DatasetStats,
}

impl SalesTable {
    /// Build a table from parsed rows. An empty dataset is unusable: every
    /// report would be blank, so treat it as a load failure.
    pub fn new(records: Vec<SalesRecord>) -> Result<Self, AppError> {
        if records.is_empty() {
            return Err(AppError::empty("Dataset contains no rows."));
        }

        let mut year_min = i32::MAX;
        let mut year_max = i32::MIN;
        let mut recession_rows = 0usize;
        let mut vehicle_types = HashSet::new();
        for r in &records {
            year_min = year_min.min(r.year);
            year_max = year_max.max(r.year);
            if r.recession {
                recession_rows += 1;
            }
            vehicle_types.insert(r.vehicle_type.as_str());
        }

        let stats = DatasetStats {
            n_rows: records.len(),
            year_min,
            year_max,
            recession_rows,
            vehicle_types: vehicle_types.len(),
        };

        Ok(Self { records, stats })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn stats(&self) -> &DatasetStats {
        &self.stats
    }
}

/// Top-level report selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Yearly breakdown (requires a selected year for the per-year charts).
    Yearly,
    /// Recession-period breakdown (the year selector is hidden).
    Recession,
}

impl ReportMode {
    /// Human-readable label matching the dashboard's dropdown entries.
    pub fn display_name(self) -> &'static str {
        match self {
            ReportMode::Yearly => "Yearly Statistics",
            ReportMode::Recession => "Recession Period Statistics",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReportMode::Yearly => ReportMode::Recession,
            ReportMode::Recession => ReportMode::Yearly,
        }
    }

    pub fn prev(self) -> Self {
        // Two entries, so the cycle is its own inverse.
        self.next()
    }
}

/// The two reactive inputs. `year` only affects output when `mode` is
/// `Yearly`; the recession report ignores it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReportSelection {
    pub mode: Option<ReportMode>,
    pub year: Option<i32>,
}

impl ReportSelection {
    pub fn new(mode: Option<ReportMode>, year: Option<i32>) -> Self {
        Self { mode, year }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            mode: Some(ReportMode::Yearly),
            year: Some(year),
        }
    }

    pub fn recession() -> Self {
        Self {
            mode: Some(ReportMode::Recession),
            year: None,
        }
    }
}

/// A grouping key in a summary table.
///
/// `Rate` carries the one row-level (unaggregated) dimension: the
/// unemployment rate of an individual record.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Year(i32),
    Label(String),
    Rate(f64),
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Year(y) => write!(f, "{y}"),
            GroupKey::Label(s) => write!(f, "{s}"),
            GroupKey::Rate(r) => write!(f, "{r:.1}"),
        }
    }
}

/// One row of a summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: GroupKey,
    /// Color dimension value for row-level tables (`Vehicle_Type` on the
    /// unemployment-rate chart); `None` for aggregated tables.
    pub series: Option<String>,
    pub value: f64,
}

/// A derived view keyed by one dimension, holding one aggregated measure.
///
/// Recomputed on every selection change; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    /// Name of the grouped key column (e.g. `Year`, `Vehicle_Type`).
    pub dimension: &'static str,
    /// Name of the aggregated value column (e.g. `Automobile_Sales`).
    pub measure: &'static str,
    pub rows: Vec<SummaryRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, recession: bool, vehicle_type: &str) -> SalesRecord {
        SalesRecord {
            year,
            month: "Jan".to_string(),
            vehicle_type: vehicle_type.to_string(),
            automobile_sales: 1.0,
            price: 1.0,
            advertising_expenditure: 1.0,
            unemployment_rate: 5.0,
            recession,
        }
    }

    #[test]
    fn table_stats_cover_span_and_counts() {
        let table = SalesTable::new(vec![
            record(1999, true, "Sedan"),
            record(2005, false, "Truck"),
            record(2001, true, "Sedan"),
        ])
        .unwrap();

        let stats = table.stats();
        assert_eq!(stats.n_rows, 3);
        assert_eq!(stats.year_min, 1999);
        assert_eq!(stats.year_max, 2005);
        assert_eq!(stats.recession_rows, 2);
        assert_eq!(stats.vehicle_types, 2);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = SalesTable::new(Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn mode_cycle_toggles_between_the_two_reports() {
        assert_eq!(ReportMode::Yearly.next(), ReportMode::Recession);
        assert_eq!(ReportMode::Recession.next(), ReportMode::Yearly);
        assert_eq!(ReportMode::Yearly.prev(), ReportMode::Recession);
    }

    #[test]
    fn group_key_display() {
        assert_eq!(GroupKey::Year(1984).to_string(), "1984");
        assert_eq!(GroupKey::Label("Sports".to_string()).to_string(), "Sports");
        assert_eq!(GroupKey::Rate(5.25).to_string(), "5.2");
    }
}
