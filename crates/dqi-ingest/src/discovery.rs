//! File discovery under a study root.
//!
//! Every immediate subdirectory of the root is one study. Inside a study,
//! each Excel-family file and each subdirectory of CSV files is a workbook.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

const EXCEL_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Physical layout of a workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    Excel,
    /// A directory whose CSV files are the sheets.
    CsvDirectory,
}

impl WorkbookFormat {
    /// Detects the format of `path`, or `None` when it is not a workbook.
    pub fn detect(path: &Path) -> Option<Self> {
        if path.is_dir() {
            return Some(Self::CsvDirectory);
        }
        let ext = path.extension().and_then(|ext| ext.to_str())?;
        EXCEL_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
            .then_some(Self::Excel)
    }
}

/// A study and its workbooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyFiles {
    pub name: String,
    pub dir: PathBuf,
    pub files: Vec<PathBuf>,
}

/// Name used for classification: the file stem, or the directory name.
pub fn workbook_stem(path: &Path) -> String {
    let stem = if path.is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    };
    stem.map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Hidden entries and Office lock files.
fn is_ignored(path: &Path) -> bool {
    let name = file_name(path);
    name.starts_with('.') || name.starts_with("~$")
}

fn read_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut paths = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        paths.push(entry.path());
    }

    // Sort by filename
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file() && !is_ignored(path))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect())
}

/// Lists the immediate subdirectories of the study root, sorted by name.
///
/// # Errors
///
/// Fails when the root is missing, not a directory, or unreadable.
pub fn list_study_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(read_entries(root)?
        .into_iter()
        .filter(|path| path.is_dir() && !is_ignored(path))
        .collect())
}

/// Lists the workbooks of one study, sorted by name.
pub fn list_workbooks(study_dir: &Path) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = read_entries(study_dir)?
        .into_iter()
        .filter(|path| !is_ignored(path))
        .filter(|path| {
            let known = WorkbookFormat::detect(path).is_some();
            if !known {
                debug!(path = %path.display(), "skipping non-workbook entry");
            }
            known
        })
        .collect();
    Ok(files)
}

/// Study name: the directory's own name.
pub fn study_name(study_dir: &Path) -> String {
    file_name(study_dir)
}
