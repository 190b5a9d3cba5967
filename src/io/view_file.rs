//! Read/write view JSON files.
//!
//! A view file is the "portable" representation of a rendered dashboard
//! frame: the selection that produced it plus the declarative chart specs.
//! An external presentation shell (or the `show` subcommand) can render it
//! without touching the dataset.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ReportSelection;
use crate::error::AppError;
use crate::view::ViewModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewFile {
    pub tool: String,
    pub selection: ReportSelection,
    pub view: ViewModel,
}

/// Write a view JSON file.
pub fn write_view_json(path: &Path, selection: &ReportSelection, view: &ViewModel) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create view JSON '{}': {e}", path.display()))
    })?;

    let contents = ViewFile {
        tool: "autostats".to_string(),
        selection: *selection,
        view: view.clone(),
    };

    serde_json::to_writer_pretty(file, &contents)
        .map_err(|e| AppError::usage(format!("Failed to write view JSON: {e}")))?;

    Ok(())
}

/// Read a view JSON file.
pub fn read_view_json(path: &Path) -> Result<ViewFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::usage(format!("Failed to open view JSON '{}': {e}", path.display()))
    })?;
    let contents: ViewFile = serde_json::from_reader(file)
        .map_err(|e| AppError::usage(format!("Invalid view JSON: {e}")))?;
    Ok(contents)
}
