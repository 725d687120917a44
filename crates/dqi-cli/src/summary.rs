use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dqi_core::StudySummary;
use dqi_model::{ExtractionErrorEntry, Snapshot};

use crate::types::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Study root: {}", result.study_root.display());
    if result.dry_run {
        println!("Dry run: no files written");
    }
    for path in &result.written {
        println!("Wrote: {}", path.display());
    }
    println!("{}", study_table(&result.output.studies));
    println!("{}", metrics_table(&result.output.snapshot));
    if !result.output.errors.is_empty() {
        eprintln!("Extraction errors:");
        eprintln!("{}", error_table(&result.output.errors));
    }
}

pub fn study_table(studies: &[StudySummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Files"),
        header_cell("Ignored"),
        header_cell("Records"),
        header_cell("Errors"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut totals = StudySummary::default();
    for study in studies {
        totals.files_processed += study.files_processed;
        totals.files_ignored += study.files_ignored;
        totals.records += study.records;
        totals.errors += study.errors;
        table.add_row(vec![
            Cell::new(&study.study)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(study.files_processed),
            count_cell(study.files_ignored, Color::Yellow),
            Cell::new(study.records),
            count_cell(study.errors, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(totals.files_processed).add_attribute(Attribute::Bold),
        count_cell(totals.files_ignored, Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(totals.records).add_attribute(Attribute::Bold),
        count_cell(totals.errors, Color::Red).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn metrics_table(snapshot: &Snapshot) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows = [
        ("Studies processed", snapshot.extraction_stats.studies_processed.to_string()),
        ("Queries (open / total)", format!("{} / {}", snapshot.queries.open, snapshot.queries.total)),
        ("Query resolution rate", format!("{:.1}%", snapshot.queries.resolution_rate)),
        ("SAEs (open / total)", format!("{} / {}", snapshot.saes.open, snapshot.saes.total)),
        ("Missing visits", snapshot.visits.total_missing.to_string()),
        ("Missing pages", snapshot.pages.total_missing.to_string()),
        ("Lab issues", snapshot.lab.total_issues.to_string()),
        ("Uncoded terms", snapshot.coding.total_uncoded.to_string()),
        ("SDV verification rate", format!("{:.1}%", snapshot.sdv.verification_rate)),
        ("Pending signatures", snapshot.signatures.pending.to_string()),
        ("EDRR open issues", snapshot.edrr.open_issues.to_string()),
        ("Inactivated forms", snapshot.inactivated.total_forms.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("DQI")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dqi_cell(snapshot.current_dqi),
    ]);
    table
}

fn error_table(errors: &[ExtractionErrorEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Study"),
        header_cell("Kind"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    for entry in errors {
        table.add_row(vec![
            Cell::new(&entry.study),
            Cell::new(entry.kind_label()).fg(Color::Red),
            Cell::new(&entry.message),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dqi_cell(value: f64) -> Cell {
    let color = if value >= 85.0 {
        Color::Green
    } else if value >= 70.0 {
        Color::Yellow
    } else {
        Color::Red
    };
    Cell::new(format!("{value:.1}"))
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
