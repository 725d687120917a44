//! Tabular sources for study workbooks.
//!
//! Provides the [`TabularSource`] capability with Excel, CSV-directory and
//! in-memory implementations, plus discovery of studies and their workbooks
//! under a study root.

pub mod csv;
pub mod discovery;
pub mod error;
pub mod excel;
pub mod memory;
pub mod sheet;
pub mod source;

pub use csv::{CsvWorkbook, read_csv_sheet};
pub use discovery::{
    StudyFiles, WorkbookFormat, list_csv_files, list_study_dirs, list_workbooks, study_name,
    workbook_stem,
};
pub use error::{IngestError, Result};
pub use excel::ExcelWorkbook;
pub use memory::MemoryWorkbook;
pub use sheet::{Sheet, normalize_header};
pub use source::{FsOpener, SourceOpener, TabularSource};
