//! Command-line parsing for the sales statistics dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the aggregation/view code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{ReportMode, YEAR_MAX, YEAR_MIN};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autostats", version, about = "Automobile Sales Statistics (terminal dashboard)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive dashboard.
    ///
    /// Loads the dataset once, then recomputes the chart region on every
    /// selector change.
    Tui(TuiArgs),
    /// Print the charts for a fixed selection (useful for scripting).
    Report(ReportArgs),
    /// Print a previously exported view JSON.
    Show(ShowArgs),
}

/// Where the dataset comes from (shared by `tui` and `report`).
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Load the dataset from a local CSV file instead of fetching it.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub data_file: Option<PathBuf>,

    /// Override the dataset URL (also settable via AUTOSTATS_DATA_URL).
    #[arg(long, value_name = "URL")]
    pub data_url: Option<String>,
}

#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    #[command(flatten)]
    pub data: DataArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// Report mode (omit for the blank view).
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<ReportMode>,

    /// Year for the yearly report.
    #[arg(
        short = 'y',
        long,
        value_parser = clap::value_parser!(i32).range(YEAR_MIN as i64..=YEAR_MAX as i64)
    )]
    pub year: Option<i32>,

    #[command(flatten)]
    pub data: DataArgs,

    /// Export the chart data to a flat CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the view (selection + chart specs) to JSON.
    #[arg(long = "export-view", value_name = "JSON")]
    pub export_view: Option<PathBuf>,
}

/// Options for printing a saved view.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// View JSON produced by `report --export-view`.
    #[arg(value_name = "JSON")]
    pub view: PathBuf,
}
