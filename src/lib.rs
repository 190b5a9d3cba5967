//! `auto-stats` library crate.
//!
//! The binary (`autostats`) is a thin wrapper around this library so that:
//!
//! - core logic (aggregation, selector rules, chart building) is testable
//!   without spawning processes or a terminal
//! - the same view pipeline backs both the TUI and the plain-text reports
//! - code stays easy to navigate as the project grows

pub mod agg;
pub mod app;
pub mod charts;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod tui;
pub mod view;
