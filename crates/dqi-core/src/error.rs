//! Error types for study extraction and runs.

use std::path::PathBuf;

use thiserror::Error;

use dqi_ingest::IngestError;

/// A failure while extracting one workbook. Recorded per file; never aborts a run.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// None of the sheets a kind reads exists in the workbook.
    #[error("no expected sheet found in {source_label} (expected one of: {})", expected.join(", "))]
    MissingSheets {
        source_label: String,
        expected: Vec<String>,
    },
}

/// A failure that aborts the whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("study root not found or not a directory: {path}")]
    StudyRootNotFound { path: PathBuf },

    #[error("failed to discover studies under {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: IngestError,
    },

    #[error("failed to start extraction workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
