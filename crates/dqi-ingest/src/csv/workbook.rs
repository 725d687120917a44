//! A directory of CSV files treated as one workbook.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discovery::{list_csv_files, workbook_stem};
use crate::error::{IngestError, Result};
use crate::sheet::Sheet;
use crate::source::TabularSource;

use super::reader::read_csv_sheet;

/// Each `*.csv` file in the directory is a sheet named by its file stem.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    label: String,
    sheets: Vec<(String, PathBuf)>,
}

impl CsvWorkbook {
    /// Lists the directory's CSV files without reading them.
    ///
    /// # Errors
    ///
    /// Returns an error when `dir` is not a readable directory.
    pub fn open(dir: &Path) -> Result<Self> {
        let sheets = list_csv_files(dir)?
            .into_iter()
            .map(|path| (workbook_stem(&path), path))
            .collect::<Vec<_>>();
        let label = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        debug!(workbook = %label, sheets = sheets.len(), "opened CSV workbook");
        Ok(Self { label, sheets })
    }
}

impl TabularSource for CsvWorkbook {
    fn label(&self) -> &str {
        &self.label
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        let path = self
            .sheets
            .iter()
            .find(|(sheet, _)| sheet == name)
            .map(|(_, path)| path)
            .ok_or_else(|| IngestError::SheetNotFound {
                source_label: self.label.clone(),
                sheet: name.to_string(),
            })?;
        read_csv_sheet(path, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_workbook() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("SAE Dashboard_Safety.csv"),
            "Patient ID,Review Status,Case Status\nP-1,Review Completed,Open\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("SAE Dashboard_DM.csv"),
            "Patient ID,Review Status\nP-1,Pending\nP-2,Review Completed\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        dir
    }

    #[test]
    fn test_sheet_names_sorted_by_file_name() {
        let dir = create_workbook();
        let workbook = CsvWorkbook::open(dir.path()).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec!["SAE Dashboard_DM", "SAE Dashboard_Safety"]
        );
    }

    #[test]
    fn test_read_sheet_by_name() {
        let dir = create_workbook();
        let mut workbook = CsvWorkbook::open(dir.path()).unwrap();
        let sheet = workbook.read_sheet("SAE Dashboard_DM").unwrap();
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.text(&["Patient ID"], 1), Some("P-2".to_string()));
    }

    #[test]
    fn test_read_missing_sheet() {
        let dir = create_workbook();
        let mut workbook = CsvWorkbook::open(dir.path()).unwrap();
        let result = workbook.read_sheet("Missing Visits");
        assert!(matches!(result, Err(IngestError::SheetNotFound { .. })));
    }
}
