//! CSV reading utilities.

mod reader;
mod workbook;

pub use reader::read_csv_sheet;
pub use workbook::CsvWorkbook;
