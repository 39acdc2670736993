//! Error types for the repetitive element parser.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum RepelError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file extension '.{extension}' for {path:?} (expected .xlsx, .csv, .tsv, .json or .parquet)")]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("Sheet index {index} out of range for {path:?}: file has {available} sheet(s)")]
    SheetOutOfRange {
        path: PathBuf,
        index: usize,
        available: usize,
    },

    #[error("Sheet {index} of {path:?} has no header row")]
    EmptySheet { path: PathBuf, index: usize },

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Non-numeric value '{value}' in column '{column}' at row {row}")]
    NonNumeric {
        column: String,
        row: usize,
        value: String,
    },

    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, RepelError>;
