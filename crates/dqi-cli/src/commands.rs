use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use comfy_table::Table;
use tracing::info;

use dqi_cli::export::{JS_FILE_NAME, JSON_FILE_NAME, write_errors_csv, write_js, write_json};
use dqi_core::{RunOptions, default_registry, rule_for, run};
use dqi_model::SourceKind;

use crate::cli::RunArgs;
use crate::summary::apply_table_style;
use crate::types::RunResult;

pub fn run_kinds() {
    let registry = default_registry();
    let mut table = Table::new();
    table.set_header(vec!["Kind", "Description", "File name", "Sheets"]);
    apply_table_style(&mut table);
    for kind in SourceKind::ALL {
        let sheets = registry
            .get(kind)
            .map(|normalizer| normalizer.sheets())
            .filter(|sheets| !sheets.is_empty())
            .map_or_else(|| "all sheets".to_string(), |sheets| sheets.join(", "));
        table.add_row(vec![
            kind.label().to_string(),
            kind.description().to_string(),
            rule_for(kind).describe(),
            sheets,
        ]);
    }
    println!("{table}");
}

pub fn run_study_root(args: &RunArgs) -> Result<RunResult> {
    let started = Instant::now();
    let options = RunOptions {
        jobs: args.jobs,
        seed: args.seed,
        data_source: args.data_source.clone(),
    };
    let now = Utc::now();
    let output = run(&args.study_root, &options, now)
        .with_context(|| format!("process study root {}", args.study_root.display()))?;

    let mut written = Vec::new();
    if !args.dry_run {
        fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("create output dir {}", args.output_dir.display()))?;
        if args.format.wants_json() {
            let path = args.output_dir.join(JSON_FILE_NAME);
            write_json(&path, &output.snapshot)?;
            written.push(path);
        }
        if args.format.wants_js() {
            let path = args.output_dir.join(JS_FILE_NAME);
            write_js(&path, &output.snapshot, now)?;
            written.push(path);
        }
        if let Some(path) = &args.errors_csv {
            write_errors_csv(path, &output.errors)?;
            written.push(path.clone());
        }
    }

    info!(
        studies = output.studies.len(),
        files = written.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );

    Ok(RunResult {
        study_root: args.study_root.clone(),
        output,
        written,
        dry_run: args.dry_run,
    })
}
