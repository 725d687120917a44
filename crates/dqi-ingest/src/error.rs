//! Error types for tabular source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading tabular sources.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not a directory.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path exists but is neither a known workbook file nor a CSV directory.
    #[error("unsupported tabular source: {path}")]
    UnsupportedSource { path: PathBuf },

    // === Workbook Errors ===
    /// The workbook container could not be opened.
    #[error("failed to open workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    /// Requested sheet does not exist in the source.
    #[error("sheet '{sheet}' not found in {source_label}")]
    SheetNotFound { source_label: String, sheet: String },

    /// The sheet exists but its cells could not be read.
    #[error("failed to read sheet '{sheet}' in {source_label}: {message}")]
    SheetRead {
        source_label: String,
        sheet: String,
        message: String,
    },

    /// Two header cells normalize to the same column name.
    #[error("duplicate column '{column}' in sheet '{sheet}'")]
    DuplicateColumn { sheet: String, column: String },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
