//! Excel-family workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) read with calamine.
//!
//! The first non-empty row of a sheet is its header. Columns whose header cell
//! is blank are dropped. A column holding only numeric cells becomes `Float64`;
//! anything else is read as text.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
use tracing::debug;

use dqi_common::format_numeric;

use crate::error::{IngestError, Result};
use crate::sheet::{Sheet, normalize_header};
use crate::source::TabularSource;

pub struct ExcelWorkbook {
    label: String,
    sheet_names: Vec<String>,
    workbook: Sheets<BufReader<File>>,
}

impl ExcelWorkbook {
    /// Opens a workbook, detecting the container format from its extension.
    ///
    /// # Errors
    ///
    /// [`IngestError::Workbook`] when the file is missing or not a valid workbook.
    pub fn open(path: &Path) -> Result<Self> {
        let workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let sheet_names = workbook.sheet_names().to_vec();
        debug!(workbook = %label, sheets = sheet_names.len(), "opened workbook");
        Ok(Self {
            label,
            sheet_names,
            workbook,
        })
    }
}

impl TabularSource for ExcelWorkbook {
    fn label(&self) -> &str {
        &self.label
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheet_names.clone()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        if !self.has_sheet(name) {
            return Err(IngestError::SheetNotFound {
                source_label: self.label.clone(),
                sheet: name.to_string(),
            });
        }
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| IngestError::SheetRead {
                source_label: self.label.clone(),
                sheet: name.to_string(),
                message: e.to_string(),
            })?;
        range_to_sheet(name, &range)
    }
}

/// Converts a cell range into a sheet.
pub(crate) fn range_to_sheet(name: &str, range: &Range<Data>) -> Result<Sheet> {
    let mut rows = range
        .rows()
        .filter(|row| row.iter().any(|cell| !is_blank(cell)));
    let Some(header) = rows.next() else {
        return Ok(Sheet::empty(name));
    };
    let body: Vec<&[Data]> = rows.collect();

    let mut columns: Vec<Column> = Vec::new();
    for (idx, cell) in header.iter().enumerate() {
        let header_text = normalize_header(&cell_text(cell).unwrap_or_default());
        if header_text.is_empty() {
            continue;
        }
        let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(idx)).collect();
        columns.push(build_column(&header_text, &cells));
    }
    Sheet::from_columns(name, columns)
}

fn build_column(header: &str, cells: &[Option<&Data>]) -> Column {
    let numeric = cells
        .iter()
        .flatten()
        .filter(|cell| !is_blank(cell))
        .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)));
    if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.and_then(cell_number)).collect();
        Series::new(header.into(), values).into_column()
    } else {
        let values: Vec<Option<String>> = cells.iter().map(|cell| cell.and_then(cell_text)).collect();
        Series::new(header.into(), values).into_column()
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(n) => Some(*n as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Int(n) => Some(n.to_string()),
        Data::Float(f) => Some(format_numeric(*f)),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}
