//! Study extraction and the composite data quality index.
//!
//! A run discovers studies under a root, classifies their workbooks, turns
//! each sheet into typed records, and reduces the merged records to one
//! [`Snapshot`](dqi_model::Snapshot).

pub mod aggregate;
pub mod classify;
pub mod coordinator;
pub mod dqi;
pub mod error;
pub mod hierarchy;
pub mod normalize;
pub mod run;
pub mod snapshot;

pub use aggregate::{
    RunMetrics, SIGNATURE_OVERDUE_DAYS, VISIT_OVERDUE_DAYS, aggregate, percentage, query_aging,
    query_metrics, round1,
};
pub use classify::{FilenameRule, RULES, classify, rule_for};
pub use coordinator::{
    FileExtraction, StudyExtraction, extract_file, extract_study, extract_study_dir,
};
pub use dqi::{TREND_WEEKS, components, composite_index, rounded, simulate_trend};
pub use error::{ExtractError, RunError};
pub use hierarchy::build_hierarchy;
pub use normalize::{Normalizer, NormalizerRegistry, build_default_registry, default_registry};
pub use run::{RunOptions, RunOutput, StudySummary, run, run_with};
pub use snapshot::{assemble, default_data_source};
