//! Group-and-reduce aggregation over the sales table.
//!
//! `aggregate` is a pure function of `(table, selection)`; the TUI calls it
//! on every selector change and replaces the previous output wholesale, so
//! determinism matters more than speed here (the table is a few thousand
//! rows).
//!
//! Grouping order is part of the contract:
//! - `Year` keys are sorted ascending
//! - categorical keys keep first-appearance order (not alphabetical)

use std::collections::HashMap;
use std::hash::Hash;

use crate::domain::{GroupKey, ReportMode, ReportSelection, SalesRecord, SalesTable, SummaryRow, SummaryTable};

/// Compute the summary tables backing the chart region.
///
/// Returns four tables for a complete selection and an empty list otherwise
/// (mode unset, or yearly mode without a year). Callers render whatever comes
/// back; an incomplete selection is a blank view, not an error.
pub fn aggregate(table: &SalesTable, selection: &ReportSelection) -> Vec<SummaryTable> {
    match (selection.mode, selection.year) {
        (Some(ReportMode::Recession), _) => recession_summaries(table),
        (Some(ReportMode::Yearly), Some(year)) => yearly_summaries(table, year),
        _ => Vec::new(),
    }
}

fn recession_summaries(table: &SalesTable) -> Vec<SummaryTable> {
    let rec: Vec<&SalesRecord> = table.records().iter().filter(|r| r.recession).collect();

    let mut sales_by_year = group_mean(&rec, |r| r.year, |r| r.automobile_sales);
    sales_by_year.sort_by_key(|(year, _)| *year);

    let sales_by_type = group_mean(&rec, |r| r.vehicle_type.clone(), |r| r.automobile_sales);
    let expenditure_by_type = group_sum(&rec, |r| r.vehicle_type.clone(), |r| {
        r.automobile_sales * r.price
    });

    // Row-level: one entry per filtered record, colored by vehicle type.
    let unemployment_rows = rec
        .iter()
        .map(|r| SummaryRow {
            key: GroupKey::Rate(r.unemployment_rate),
            series: Some(r.vehicle_type.clone()),
            value: r.automobile_sales,
        })
        .collect();

    vec![
        year_table("Automobile_Sales", sales_by_year),
        label_table("Vehicle_Type", "Automobile_Sales", sales_by_type),
        label_table("Vehicle_Type", "Total_Expenditure", expenditure_by_type),
        SummaryTable {
            dimension: "unemployment_rate",
            measure: "Automobile_Sales",
            rows: unemployment_rows,
        },
    ]
}

fn yearly_summaries(table: &SalesTable, year: i32) -> Vec<SummaryTable> {
    let all: Vec<&SalesRecord> = table.records().iter().collect();
    let selected: Vec<&SalesRecord> = table.records().iter().filter(|r| r.year == year).collect();

    // Charts 1 and 2 span the full history on purpose: they give the
    // surrounding context for the per-year charts below.
    let mut sales_by_year = group_mean(&all, |r| r.year, |r| r.automobile_sales);
    sales_by_year.sort_by_key(|(y, _)| *y);

    let sales_by_month = group_sum(&all, |r| r.month.clone(), |r| r.automobile_sales);

    let month_in_year = group_sum(&selected, |r| r.month.clone(), |r| r.automobile_sales);
    let advertising_by_type = group_sum(&selected, |r| r.vehicle_type.clone(), |r| {
        r.advertising_expenditure
    });

    vec![
        year_table("Automobile_Sales", sales_by_year),
        label_table("Month", "Automobile_Sales", sales_by_month),
        label_table("Month", "Automobile_Sales", month_in_year),
        label_table("Vehicle_Type", "Advertising_Expenditure", advertising_by_type),
    ]
}

fn year_table(measure: &'static str, groups: Vec<(i32, f64)>) -> SummaryTable {
    SummaryTable {
        dimension: "Year",
        measure,
        rows: groups
            .into_iter()
            .map(|(year, value)| SummaryRow {
                key: GroupKey::Year(year),
                series: None,
                value,
            })
            .collect(),
    }
}

fn label_table(dimension: &'static str, measure: &'static str, groups: Vec<(String, f64)>) -> SummaryTable {
    SummaryTable {
        dimension,
        measure,
        rows: groups
            .into_iter()
            .map(|(label, value)| SummaryRow {
                key: GroupKey::Label(label),
                series: None,
                value,
            })
            .collect(),
    }
}

#[derive(Default)]
struct Bucket {
    sum: f64,
    count: usize,
}

/// Group rows by a key, preserving first-appearance order.
fn group_by<K, KF, VF>(rows: &[&SalesRecord], key_of: KF, value_of: VF) -> Vec<(K, Bucket)>
where
    K: Clone + Eq + Hash,
    KF: Fn(&SalesRecord) -> K,
    VF: Fn(&SalesRecord) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, Bucket)> = Vec::new();

    for &r in rows {
        let key = key_of(r);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            out.push((key, Bucket::default()));
            out.len() - 1
        });
        let bucket = &mut out[slot].1;
        bucket.sum += value_of(r);
        bucket.count += 1;
    }

    out
}

fn group_sum<K, KF, VF>(rows: &[&SalesRecord], key_of: KF, value_of: VF) -> Vec<(K, f64)>
where
    K: Clone + Eq + Hash,
    KF: Fn(&SalesRecord) -> K,
    VF: Fn(&SalesRecord) -> f64,
{
    group_by(rows, key_of, value_of)
        .into_iter()
        .map(|(k, b)| (k, b.sum))
        .collect()
}

fn group_mean<K, KF, VF>(rows: &[&SalesRecord], key_of: KF, value_of: VF) -> Vec<(K, f64)>
where
    K: Clone + Eq + Hash,
    KF: Fn(&SalesRecord) -> K,
    VF: Fn(&SalesRecord) -> f64,
{
    group_by(rows, key_of, value_of)
        .into_iter()
        .map(|(k, b)| (k, b.sum / b.count as f64))
        .collect()
}
