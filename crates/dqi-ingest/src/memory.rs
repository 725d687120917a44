//! In-memory workbooks for tests and embedding callers.

use crate::error::{IngestError, Result};
use crate::sheet::Sheet;
use crate::source::TabularSource;

#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    label: String,
    sheets: Vec<Sheet>,
}

impl MemoryWorkbook {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            sheets: Vec::new(),
        }
    }

    /// Adds a sheet, replacing any sheet with the same name.
    #[must_use]
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.retain(|existing| existing.name() != sheet.name());
        self.sheets.push(sheet);
        self
    }
}

impl TabularSource for MemoryWorkbook {
    fn label(&self) -> &str {
        &self.label
    }

    fn sheet_names(&self) -> Vec<String> {
        self.sheets
            .iter()
            .map(|sheet| sheet.name().to_string())
            .collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<Sheet> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name() == name)
            .cloned()
            .ok_or_else(|| IngestError::SheetNotFound {
                source_label: self.label.clone(),
                sheet: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_workbook() {
        let mut workbook = MemoryWorkbook::new("fixture.xlsx")
            .with_sheet(Sheet::empty("SDV"))
            .with_sheet(Sheet::empty("PI Signature Report"))
            .with_sheet(Sheet::empty("SDV"));

        assert_eq!(workbook.sheet_names(), vec!["PI Signature Report", "SDV"]);
        assert!(workbook.has_sheet("SDV"));
        assert!(workbook.read_sheet("SDV").is_ok());
        assert!(matches!(
            workbook.read_sheet("Query Report - Cumulative"),
            Err(IngestError::SheetNotFound { .. })
        ));
    }
}
