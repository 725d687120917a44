//! End-to-end run over a study root.
//!
//! Studies are extracted on a rayon pool sized by [`RunOptions::jobs`]. The
//! parallel iterator collects in study-name order, so the merged output does
//! not depend on scheduling.

use std::path::Path;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{Span, info, info_span};

use dqi_ingest::{FsOpener, SourceOpener, list_study_dirs};
use dqi_model::{ExtractionErrorEntry, ExtractionStats, RecordBatch, Snapshot};

use crate::coordinator::{StudyExtraction, extract_study_dir};
use crate::error::RunError;
use crate::normalize::{NormalizerRegistry, default_registry};
use crate::snapshot::{assemble, default_data_source};

/// Options for one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Worker threads; 0 lets rayon pick the available parallelism.
    pub jobs: usize,
    /// Seed for the simulated trend. Unseeded runs draw from OS entropy.
    pub seed: Option<u64>,
    /// Overrides the default `dataSource` text.
    pub data_source: Option<String>,
}

/// Per-study counts for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudySummary {
    pub study: String,
    pub files_processed: usize,
    pub files_ignored: usize,
    pub records: usize,
    pub errors: usize,
}

impl StudySummary {
    fn from_extraction(extraction: &StudyExtraction) -> Self {
        Self {
            study: extraction.study.clone(),
            files_processed: extraction.files_processed.values().sum(),
            files_ignored: extraction.ignored_files,
            records: extraction.batch.len(),
            errors: extraction.errors.len(),
        }
    }
}

/// Result of a run: the snapshot plus the detail that does not go into it.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub snapshot: Snapshot,
    pub errors: Vec<ExtractionErrorEntry>,
    pub studies: Vec<StudySummary>,
}

impl RunOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Runs the full pipeline with filesystem sources and the default normalizers.
///
/// # Errors
///
/// Fails only when the study root is missing or cannot be listed, or the
/// worker pool cannot be started. Study and file failures are reported in
/// [`RunOutput::errors`].
pub fn run(root: &Path, options: &RunOptions, now: DateTime<Utc>) -> Result<RunOutput, RunError> {
    run_with(root, options, now, &FsOpener, default_registry())
}

/// [`run`] with an explicit opener and registry.
///
/// # Errors
///
/// See [`run`].
pub fn run_with(
    root: &Path,
    options: &RunOptions,
    now: DateTime<Utc>,
    opener: &dyn SourceOpener,
    registry: &NormalizerRegistry,
) -> Result<RunOutput, RunError> {
    if !root.is_dir() {
        return Err(RunError::StudyRootNotFound {
            path: root.to_path_buf(),
        });
    }

    let span = info_span!("run", root = %root.display());
    let _guard = span.enter();

    let studies = list_study_dirs(root).map_err(|source| RunError::Discovery {
        path: root.to_path_buf(),
        source,
    })?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .thread_name(|index| format!("dqi-study-{index}"))
        .build()?;
    info!(
        studies = studies.len(),
        jobs = pool.current_num_threads(),
        "discovered studies"
    );

    let parent = Span::current();
    let extractions: Vec<StudyExtraction> = pool.install(|| {
        studies
            .par_iter()
            .map(|dir| {
                let _entered = parent.enter();
                extract_study_dir(dir, opener, registry)
            })
            .collect()
    });

    let mut batch = RecordBatch::new();
    let mut stats = ExtractionStats {
        studies_processed: studies.len(),
        ..ExtractionStats::default()
    };
    let mut errors = Vec::new();
    let mut summaries = Vec::with_capacity(extractions.len());

    for extraction in extractions {
        summaries.push(StudySummary::from_extraction(&extraction));
        for (kind, count) in extraction.files_processed {
            *stats.files_processed.entry(kind.label().to_string()).or_default() += count;
        }
        for (key, rows) in extraction.rows_read {
            *stats.records_extracted.entry(key).or_default() += rows;
        }
        errors.extend(extraction.errors);
        let mut study_batch = extraction.batch;
        batch.append(&mut study_batch);
    }
    stats.errors = errors.len();

    let data_source = options
        .data_source
        .clone()
        .unwrap_or_else(|| default_data_source(studies.len()));
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let snapshot = assemble(&batch, stats, data_source, now, &mut rng);

    info!(
        records = batch.len(),
        errors = errors.len(),
        dqi = snapshot.current_dqi,
        "run complete"
    );

    Ok(RunOutput {
        snapshot,
        errors,
        studies: summaries,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use chrono::TimeZone;
    use dqi_ingest::{IngestError, MemoryWorkbook, TabularSource};
    use dqi_model::SourceKind;
    use tempfile::TempDir;

    use super::*;
    use crate::normalize::fixtures::sheet;

    /// Serves in-memory workbooks keyed by file name.
    struct NamedOpener {
        books: HashMap<String, MemoryWorkbook>,
    }

    impl SourceOpener for NamedOpener {
        fn open(&self, path: &Path) -> dqi_ingest::Result<Box<dyn TabularSource>> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            self.books
                .get(&name)
                .cloned()
                .map(|book| Box::new(book) as Box<dyn TabularSource>)
                .ok_or_else(|| IngestError::Workbook {
                    path: path.to_path_buf(),
                    message: "unreadable".to_string(),
                })
        }
    }

    /// Fails to list one named study directory.
    struct FailingListOpener {
        inner: NamedOpener,
        unreadable: String,
    }

    impl SourceOpener for FailingListOpener {
        fn open(&self, path: &Path) -> dqi_ingest::Result<Box<dyn TabularSource>> {
            self.inner.open(path)
        }

        fn list_workbooks(&self, study_dir: &Path) -> dqi_ingest::Result<Vec<PathBuf>> {
            if study_dir.ends_with(&self.unreadable) {
                return Err(IngestError::DirectoryRead {
                    path: study_dir.to_path_buf(),
                    source: std::io::Error::other("vanished"),
                });
            }
            self.inner.list_workbooks(study_dir)
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn study_root(studies: usize) -> TempDir {
        let root = TempDir::new().unwrap();
        for i in 1..=studies {
            let dir = root.path().join(format!("Study {i}"));
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join(format!("Study {i}_CPID_EDC_Metrics.xlsx")), "x").unwrap();
        }
        root
    }

    fn cpid_opener(studies: usize) -> NamedOpener {
        let books = (1..=studies)
            .map(|i| {
                let name = format!("Study {i}_CPID_EDC_Metrics.xlsx");
                let book = MemoryWorkbook::new(name.clone()).with_sheet(sheet(
                    "Query Report - Cumulative",
                    &[
                        ("Subject Name", &[Some("S-1"), Some("S-2")]),
                        ("Query Status", &[Some("Open"), Some("Closed")]),
                    ],
                ));
                (name, book)
            })
            .collect();
        NamedOpener { books }
    }

    #[test]
    fn missing_root_is_an_error() {
        let result = run(
            Path::new("/definitely/not/a/study/root"),
            &RunOptions::default(),
            now(),
        );
        assert!(matches!(result, Err(RunError::StudyRootNotFound { .. })));
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let root = study_root(5);
        let opener = cpid_opener(5);
        let options = |jobs| RunOptions {
            jobs,
            seed: Some(11),
            data_source: None,
        };

        let sequential = run_with(root.path(), &options(1), now(), &opener, default_registry()).unwrap();
        let parallel = run_with(root.path(), &options(3), now(), &opener, default_registry()).unwrap();

        assert_eq!(sequential.snapshot, parallel.snapshot);
        assert_eq!(sequential.studies, parallel.studies);
        assert_eq!(parallel.snapshot.queries.total, 10);
        assert_eq!(parallel.snapshot.extraction_stats.studies_processed, 5);
        assert_eq!(
            parallel.snapshot.extraction_stats.files_processed.get("CPID_EDC_Metrics"),
            Some(&5)
        );
        let names: Vec<&str> = parallel.studies.iter().map(|s| s.study.as_str()).collect();
        assert_eq!(names, vec!["Study 1", "Study 2", "Study 3", "Study 4", "Study 5"]);
    }

    #[test]
    fn file_failures_are_collected() {
        let root = study_root(2);
        let mut opener = cpid_opener(2);
        opener.books.remove("Study 2_CPID_EDC_Metrics.xlsx");

        let output = run_with(
            root.path(),
            &RunOptions {
                jobs: 2,
                seed: Some(1),
                data_source: Some("fixture".to_string()),
            },
            now(),
            &opener,
            default_registry(),
        )
        .unwrap();

        assert!(output.has_errors());
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].study, "Study 2");
        assert_eq!(output.errors[0].kind, Some(SourceKind::CpidEdcMetrics));
        assert_eq!(output.snapshot.extraction_stats.errors, 1);
        assert_eq!(output.snapshot.queries.total, 2);
        assert_eq!(output.snapshot.data_source, "fixture");
        assert_eq!(
            output.snapshot.extraction_stats.records_extracted.get("queries"),
            Some(&2)
        );
    }

    #[test]
    fn unreadable_study_does_not_abort_the_run() {
        let root = study_root(3);
        let opener = FailingListOpener {
            inner: cpid_opener(3),
            unreadable: "Study 2".to_string(),
        };

        let output = run_with(
            root.path(),
            &RunOptions {
                jobs: 2,
                seed: Some(4),
                data_source: None,
            },
            now(),
            &opener,
            default_registry(),
        )
        .unwrap();

        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].study, "Study 2");
        assert_eq!(output.errors[0].kind, None);
        assert_eq!(output.snapshot.extraction_stats.studies_processed, 3);
        assert_eq!(output.snapshot.extraction_stats.errors, 1);
        assert_eq!(output.snapshot.queries.total, 4);
        let names: Vec<&str> = output.studies.iter().map(|s| s.study.as_str()).collect();
        assert_eq!(names, vec!["Study 1", "Study 2", "Study 3"]);
        assert_eq!(output.studies[1].errors, 1);
    }

    #[test]
    fn empty_root_scores_100() {
        let root = TempDir::new().unwrap();
        let output = run(root.path(), &RunOptions::default(), now()).unwrap();
        assert_eq!(output.snapshot.current_dqi, 100.0);
        assert_eq!(output.snapshot.extraction_stats.studies_processed, 0);
        assert!(output.studies.is_empty());
    }
}
