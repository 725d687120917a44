//! The tabular source capability.
//!
//! A source is one workbook: a set of named sheets. Study extraction only
//! sees this trait, so Excel files, CSV directories and in-memory fixtures
//! are interchangeable.

use std::path::{Path, PathBuf};

use crate::csv::CsvWorkbook;
use crate::discovery::{WorkbookFormat, list_workbooks};
use crate::error::{IngestError, Result};
use crate::excel::ExcelWorkbook;
use crate::sheet::Sheet;

/// A workbook of named sheets.
pub trait TabularSource {
    /// Display label used in errors and logs, usually the file name.
    fn label(&self) -> &str;

    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Reads one sheet.
    ///
    /// # Errors
    ///
    /// [`IngestError::SheetNotFound`] when `name` is not a sheet of this source,
    /// or a read error when its cells cannot be decoded.
    fn read_sheet(&mut self, name: &str) -> Result<Sheet>;

    /// Whether a sheet with exactly this name exists.
    fn has_sheet(&self, name: &str) -> bool {
        self.sheet_names().iter().any(|sheet| sheet == name)
    }
}

/// Lists a study's workbooks and resolves each path to an open source.
pub trait SourceOpener: Sync {
    /// # Errors
    ///
    /// Returns an error when the path cannot be opened as a workbook.
    fn open(&self, path: &Path) -> Result<Box<dyn TabularSource>>;

    /// Workbooks of one study directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory is gone or cannot be read.
    fn list_workbooks(&self, study_dir: &Path) -> Result<Vec<PathBuf>> {
        list_workbooks(study_dir)
    }
}

/// Opens workbooks from the filesystem, dispatching on extension or directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOpener;

impl SourceOpener for FsOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn TabularSource>> {
        match WorkbookFormat::detect(path) {
            Some(WorkbookFormat::Excel) => Ok(Box::new(ExcelWorkbook::open(path)?)),
            Some(WorkbookFormat::CsvDirectory) => Ok(Box::new(CsvWorkbook::open(path)?)),
            None => Err(IngestError::UnsupportedSource {
                path: path.to_path_buf(),
            }),
        }
    }
}
