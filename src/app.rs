//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the dataset (remote or local)
//! - renders reports or launches the TUI
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, ReportArgs, ShowArgs};
use crate::domain::ReportSelection;
use crate::error::AppError;

/// Entry point for the `autostats` binary.
pub fn run() -> Result<(), AppError> {
    // We want plain `autostats` (and `autostats -f data.csv`) to behave like
    // `autostats tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the dashboard-first UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Report(args) => handle_report(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_report(args: ReportArgs) -> Result<(), AppError> {
    let table = crate::data::load_table(args.data.data_file.as_deref(), args.data.data_url.as_deref())?;

    let selection = ReportSelection::new(args.mode, args.year);
    let view = crate::view::render(&table, &selection);

    println!("{}", crate::report::format_report(&view, table.stats(), &selection));

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::write_view_csv(path, &view)?;
    }
    if let Some(path) = &args.export_view {
        crate::io::write_view_json(path, &selection, &view)?;
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let contents = crate::io::read_view_json(&args.view)?;

    if contents.view.charts.is_empty() {
        println!("No charts in '{}'.", args.view.display());
        return Ok(());
    }

    for chart in &contents.view.charts {
        println!("{}", crate::report::format_chart(chart));
    }
    Ok(())
}

/// Rewrite argv so `autostats` defaults to `autostats tui`.
///
/// Rules:
/// - `autostats`                      -> `autostats tui`
/// - `autostats -f data.csv ...`      -> `autostats tui -f data.csv ...`
/// - `autostats --help/--version/-h`  -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "report" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["autostats"])), argv(&["autostats", "tui"]));
    }

    #[test]
    fn leading_flags_route_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["autostats", "-f", "data.csv"])),
            argv(&["autostats", "tui", "-f", "data.csv"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["autostats", "report", "-m", "recession"])),
            argv(&["autostats", "report", "-m", "recession"])
        );
        assert_eq!(rewrite_args(argv(&["autostats", "--help"])), argv(&["autostats", "--help"]));
    }
}
