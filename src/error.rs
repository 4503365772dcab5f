use std::path::PathBuf;

use thiserror::Error;

/// Convenient alias for fallible results returned throughout the crate.
pub type Result<T> = std::result::Result<T, CaseGenError>;

/// Error type covering the failures that can occur while loading design
/// variables, substituting template lines, or writing case files.
#[derive(Debug, Error)]
pub enum CaseGenError {
    /// Wrapper for IO failures such as reading templates or writing case files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raised when a JSON variable document or configuration file is malformed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors bubbled up from the Excel reader implementation.
    #[error("Excel read error: {0}")]
    ExcelRead(#[from] calamine::XlsxError),

    /// Raised when a line carries an odd number of `?` markers.
    #[error("check line number {line} in file {file} for proper substitution formatting")]
    Format { file: String, line: usize },

    /// Raised when a named variable source does not define a referenced key.
    #[error("missing key '{key}' on line number {line} in input file {file}")]
    KeyLookup {
        key: String,
        file: String,
        line: usize,
    },

    /// Raised when a positional token does not name an element of the source.
    #[error(
        "variable index {index} is out of range (1..={len}) on line number {line} in input file {file}"
    )]
    IndexRange {
        index: i64,
        len: usize,
        file: String,
        line: usize,
    },

    /// Raised when a positional token is not an integer.
    #[error("'{token}' is not a variable index on line number {line} in input file {file}")]
    InvalidIndex {
        token: String,
        file: String,
        line: usize,
    },

    /// Raised when a variable document cannot be mapped onto a variable source.
    #[error("variable source type mismatch: {0}")]
    TypeMismatch(String),

    /// Raised when the analysis catalog has no entry for the requested type.
    #[error("unknown analysis type '{0}'")]
    UnknownAnalysisType(String),

    /// Raised when a variable document extension is not recognised.
    #[error("unsupported variable file format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Raised when a workbook does not follow the expected conventions.
    #[error("invalid workbook structure: {0}")]
    InvalidWorkbook(String),

    /// Raised when the user provides a path that does not exist.
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    /// Raised when the tracing subscriber fails to initialise.
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
