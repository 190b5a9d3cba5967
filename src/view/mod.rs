//! Selector rules and the shared view pipeline.
//!
//! Both front-ends (TUI and text reports) call `render` on every input
//! change; keeping the whole recomputation in one pure function means the
//! reactive behavior needs no internal mutable state and is trivially
//! testable.

use serde::{Deserialize, Serialize};

use crate::charts::{build_charts, ChartSpec};
use crate::domain::{ReportMode, ReportSelection, SalesTable};

/// Everything the presentation shell needs for one frame: the year-selector
/// visibility and the chart region content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub year_selector_hidden: bool,
    pub charts: Vec<ChartSpec>,
}

/// Rule A: the year selector is visible only for the yearly report.
pub fn year_selector_hidden(mode: Option<ReportMode>) -> bool {
    !matches!(mode, Some(ReportMode::Yearly))
}

/// Rule B (plus Rule A): recompute the full view for the current inputs.
///
/// No memoization and no incremental update: each call replaces the previous
/// view wholesale.
pub fn render(table: &SalesTable, selection: &ReportSelection) -> ViewModel {
    let summaries = crate::agg::aggregate(table, selection);
    ViewModel {
        year_selector_hidden: year_selector_hidden(selection.mode),
        charts: build_charts(selection, &summaries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SalesRecord, SalesTable};

    fn one_row_table() -> SalesTable {
        SalesTable::new(vec![SalesRecord {
            year: 2000,
            month: "Jan".to_string(),
            vehicle_type: "Sedan".to_string(),
            automobile_sales: 10.0,
            price: 20_000.0,
            advertising_expenditure: 100.0,
            unemployment_rate: 5.0,
            recession: true,
        }])
        .unwrap()
    }

    #[test]
    fn year_selector_shown_only_for_yearly_mode() {
        assert!(!year_selector_hidden(Some(ReportMode::Yearly)));
        assert!(year_selector_hidden(Some(ReportMode::Recession)));
        assert!(year_selector_hidden(None));
    }

    #[test]
    fn complete_selections_render_four_charts() {
        let table = one_row_table();
        assert_eq!(render(&table, &ReportSelection::recession()).charts.len(), 4);
        assert_eq!(render(&table, &ReportSelection::yearly(2000)).charts.len(), 4);
    }

    #[test]
    fn incomplete_selections_render_a_blank_region() {
        let table = one_row_table();
        let no_mode = ReportSelection::new(None, Some(2000));
        let no_year = ReportSelection::new(Some(ReportMode::Yearly), None);
        assert!(render(&table, &no_mode).charts.is_empty());
        assert!(render(&table, &no_year).charts.is_empty());
    }

    #[test]
    fn recession_view_hides_the_year_selector_but_still_charts() {
        let table = one_row_table();
        let view = render(&table, &ReportSelection::recession());
        assert!(view.year_selector_hidden);
        assert_eq!(view.charts.len(), 4);
    }

    #[test]
    fn render_is_a_pure_function_of_its_inputs() {
        let table = one_row_table();
        let selection = ReportSelection::yearly(2000);
        assert_eq!(render(&table, &selection), render(&table, &selection));
    }
}
