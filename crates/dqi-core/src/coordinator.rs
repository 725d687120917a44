//! Per-study extraction.
//!
//! Classifies each workbook of a study, opens it, and runs the matching
//! normalizer over its sheets. Failures are isolated per file: a file that
//! cannot be opened or read contributes an error entry and nothing else,
//! and the study moves on to its next file.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info, info_span, warn};

use dqi_ingest::{IngestError, SourceOpener, StudyFiles, TabularSource, study_name, workbook_stem};
use dqi_model::{ExtractionErrorEntry, Record, RecordBatch, SourceKind};

use crate::classify::classify;
use crate::error::ExtractError;
use crate::normalize::{Normalizer, NormalizerRegistry};

/// Everything one study contributed to the run.
#[derive(Debug, Clone, Default)]
pub struct StudyExtraction {
    pub study: String,
    pub batch: RecordBatch,
    /// Workbooks opened, per kind.
    pub files_processed: BTreeMap<SourceKind, usize>,
    /// Source rows read, per sheet group.
    pub rows_read: BTreeMap<String, usize>,
    pub errors: Vec<ExtractionErrorEntry>,
    /// Workbooks whose name matched no kind.
    pub ignored_files: usize,
}

/// Records and row counts from one workbook.
#[derive(Debug, Clone, Default)]
pub struct FileExtraction {
    pub records: Vec<Record>,
    pub rows_read: Vec<(&'static str, usize)>,
}

/// Runs the normalizer over the sheets it reads.
///
/// # Errors
///
/// [`ExtractError::MissingSheets`] when the kind reads named sheets and none is
/// present, or the first sheet read error. Nothing is returned for a file that
/// fails part-way.
pub fn extract_file(
    source: &mut dyn TabularSource,
    normalizer: &dyn Normalizer,
    study: &str,
) -> Result<FileExtraction, ExtractError> {
    let named = normalizer.sheets();
    let sheet_names: Vec<String> = if named.is_empty() {
        source.sheet_names()
    } else {
        let present: Vec<String> = named
            .iter()
            .filter(|name| source.has_sheet(name))
            .map(|name| (*name).to_string())
            .collect();
        if present.is_empty() {
            return Err(ExtractError::MissingSheets {
                source_label: source.label().to_string(),
                expected: named.iter().map(|name| (*name).to_string()).collect(),
            });
        }
        present
    };

    let mut extraction = FileExtraction::default();
    for name in &sheet_names {
        let sheet = source.read_sheet(name)?;
        extraction
            .rows_read
            .push((normalizer.rows_key(name), sheet.height()));
        extraction
            .records
            .extend(normalizer.normalize(&sheet, study));
    }
    Ok(extraction)
}

/// Lists the workbooks of one study directory and extracts them.
///
/// A study whose directory cannot be listed yields a single study-level error
/// entry and no records.
pub fn extract_study_dir(
    study_dir: &Path,
    opener: &dyn SourceOpener,
    registry: &NormalizerRegistry,
) -> StudyExtraction {
    let name = study_name(study_dir);
    match opener.list_workbooks(study_dir) {
        Ok(files) => extract_study(
            &StudyFiles {
                name,
                dir: study_dir.to_path_buf(),
                files,
            },
            opener,
            registry,
        ),
        Err(error) => {
            let mut extraction = StudyExtraction {
                study: name,
                ..StudyExtraction::default()
            };
            extraction.record_listing_error(&error);
            extraction
        }
    }
}

/// Extracts every classified workbook of one study.
pub fn extract_study(
    study: &StudyFiles,
    opener: &dyn SourceOpener,
    registry: &NormalizerRegistry,
) -> StudyExtraction {
    let span = info_span!("study", study = %study.name);
    let _guard = span.enter();

    let mut extraction = StudyExtraction {
        study: study.name.clone(),
        ..StudyExtraction::default()
    };

    for path in &study.files {
        let stem = workbook_stem(path);
        let Some(kind) = classify(&stem) else {
            debug!(file = %stem, "no source kind matches file name");
            extraction.ignored_files += 1;
            continue;
        };
        let Some(normalizer) = registry.get(kind) else {
            debug!(file = %stem, kind = %kind, "no normalizer registered");
            extraction.ignored_files += 1;
            continue;
        };

        let mut source = match opener.open(path) {
            Ok(source) => source,
            Err(error) => {
                extraction.record_error(kind, &ExtractError::from(error));
                continue;
            }
        };
        *extraction.files_processed.entry(kind).or_default() += 1;

        match extract_file(source.as_mut(), normalizer, &study.name) {
            Ok(file) => {
                info!(
                    file = %stem,
                    kind = %kind,
                    records = file.records.len(),
                    "file extracted"
                );
                for (key, rows) in file.rows_read {
                    *extraction.rows_read.entry(key.to_string()).or_default() += rows;
                }
                extraction.batch.extend(file.records);
            }
            Err(error) => extraction.record_error(kind, &error),
        }
    }

    extraction
}

impl StudyExtraction {
    fn record_error(&mut self, kind: SourceKind, error: &ExtractError) {
        warn!(kind = %kind, error = %error, "extraction failed");
        self.errors.push(ExtractionErrorEntry {
            study: self.study.clone(),
            kind: Some(kind),
            message: error.to_string(),
        });
    }

    fn record_listing_error(&mut self, error: &IngestError) {
        warn!(study = %self.study, error = %error, "study listing failed");
        self.errors.push(ExtractionErrorEntry {
            study: self.study.clone(),
            kind: None,
            message: error.to_string(),
        });
    }
}
