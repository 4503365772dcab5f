//! Loaders turning variable documents on disk into a [`VariableSource`].

pub mod excel_read;
pub mod json_read;

use std::path::Path;

use crate::error::{CaseGenError, Result};
use crate::model::VariableSource;

/// Supported design-variable document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableFormat {
    Json,
    Excel,
}

/// Infers the document format from the file extension.
pub fn detect_format(path: &Path) -> Option<VariableFormat> {
    let extension = path.extension()?.to_ascii_lowercase();
    match extension.to_str()? {
        "json" => Some(VariableFormat::Json),
        "xlsx" | "xlsm" => Some(VariableFormat::Excel),
        _ => None,
    }
}

/// Reads a variable source, inferring the format when none is given.
pub fn read_variables(path: &Path, format: Option<VariableFormat>) -> Result<VariableSource> {
    let format = format
        .or_else(|| detect_format(path))
        .ok_or_else(|| CaseGenError::UnsupportedFormat(path.to_path_buf()))?;

    match format {
        VariableFormat::Json => json_read::read_variables(path),
        VariableFormat::Excel => excel_read::read_variables(path),
    }
}
