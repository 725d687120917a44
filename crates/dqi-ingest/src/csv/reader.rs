//! CSV file reading.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};
use crate::sheet::{Sheet, normalize_header};

/// Reads one CSV file into a sheet named `sheet_name`.
///
/// Every column is read as text; numeric coercion happens per field in the
/// normalizers. Header cells are normalized and blank headers dropped.
pub fn read_csv_sheet(path: &Path, sheet_name: &str) -> Result<Sheet> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .filter_map(|column| {
            let header = normalize_header(column.name());
            (!header.is_empty()).then(|| column.clone().with_name(header.as_str().into()))
        })
        .collect();
    Sheet::from_columns(sheet_name, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_sheet_as_text() {
        let file = create_temp_csv("Subject,Site number ,Issue\nS-1,101,Missing range\nS-2,,\n");
        let sheet = read_csv_sheet(file.path(), "Lab").unwrap();

        assert_eq!(sheet.name(), "Lab");
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.column_name("site number"), Some("Site number"));
        assert_eq!(sheet.text(&["Site number"], 0), Some("101".to_string()));
        assert_eq!(sheet.text(&["Issue"], 1), None);
    }

    #[test]
    fn test_read_csv_sheet_with_bom() {
        let file = create_temp_csv("\u{feff}Subject,Form\nS-1,AE\n");
        let sheet = read_csv_sheet(file.path(), "Inactivated").unwrap();
        assert_eq!(sheet.text(&["Subject"], 0), Some("S-1".to_string()));
    }

    #[test]
    fn test_read_csv_sheet_missing_file() {
        let result = read_csv_sheet(Path::new("/nonexistent/sheet.csv"), "x");
        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }
}
