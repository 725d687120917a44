//! Snapshot and error-log writers.
//!
//! The snapshot is written as pretty JSON and as a JavaScript file that binds
//! it to `RealData` for dashboards loaded without a server. Extraction errors
//! go to a CSV log.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};

use dqi_model::{ExtractionErrorEntry, GOVERNANCE_STATEMENT, Snapshot};

pub const JSON_FILE_NAME: &str = "realData.json";
pub const JS_FILE_NAME: &str = "realDataEmbed.js";

/// Pretty-printed snapshot JSON.
pub fn snapshot_json(snapshot: &Snapshot) -> serde_json::Result<String> {
    serde_json::to_string_pretty(snapshot)
}

/// JavaScript source assigning the snapshot to `const RealData`.
pub fn snapshot_js(snapshot: &Snapshot, generated: DateTime<Utc>) -> serde_json::Result<String> {
    let json = snapshot_json(snapshot)?;
    let stats = &snapshot.extraction_stats;
    let files = stats
        .files_processed
        .iter()
        .map(|(kind, count)| format!("{kind}={count}"))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(format!(
        "/**\n\
         \x20* Study quality snapshot\n\
         \x20* Generated: {generated}\n\
         \x20* Studies: {studies}\n\
         \x20* Files processed: {files}\n\
         \x20*\n\
         \x20* GOVERNANCE: {GOVERNANCE_STATEMENT}\n\
         \x20*/\n\
         \n\
         const RealData = {json};\n",
        generated = generated.to_rfc3339_opts(SecondsFormat::Secs, true),
        studies = stats.studies_processed,
    ))
}

pub fn write_json(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = snapshot_json(snapshot).context("serialize snapshot")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

pub fn write_js(path: &Path, snapshot: &Snapshot, generated: DateTime<Utc>) -> Result<()> {
    let js = snapshot_js(snapshot, generated).context("serialize snapshot")?;
    fs::write(path, js).with_context(|| format!("write {}", path.display()))
}

/// Writes `study,kind,message` rows, header included, to any writer.
pub fn write_errors<W: io::Write>(writer: W, errors: &[ExtractionErrorEntry]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["study", "kind", "message"])?;
    for entry in errors {
        csv.write_record([entry.study.as_str(), entry.kind_label(), entry.message.as_str()])?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_errors_csv(path: &Path, errors: &[ExtractionErrorEntry]) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_errors(file, errors).with_context(|| format!("write {}", path.display()))
}
