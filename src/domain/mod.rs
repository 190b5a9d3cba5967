//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - dataset rows and the loaded table (`SalesRecord`, `SalesTable`)
//! - the user's selection (`ReportMode`, `ReportSelection`)
//! - derived aggregation output (`SummaryTable`, `SummaryRow`, `GroupKey`)

pub mod types;

pub use types::*;
