//! A named sheet of rows backed by a Polars `DataFrame`.
//!
//! Normalizers address cells by a list of column aliases and a row index.
//! Column names are matched case-insensitively after whitespace
//! normalization, so `"Form "` and `"form"` resolve to the same column.

use std::collections::{HashMap, HashSet};

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use dqi_common::{any_to_count, any_to_string_non_empty};

use crate::error::{IngestError, Result};

/// Normalizes a raw header cell: strips BOM markers, trims, and collapses
/// inner whitespace runs to a single space.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn lookup_key(name: &str) -> String {
    normalize_header(name).to_ascii_uppercase()
}

/// Case-insensitive map from normalized column name to the frame's column name.
#[derive(Debug, Clone, Default)]
struct ColumnLookup {
    map: HashMap<String, String>,
}

impl ColumnLookup {
    fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(lookup_key(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&lookup_key(name)).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    frame: DataFrame,
    columns: ColumnLookup,
}

impl Sheet {
    pub fn new(name: impl Into<String>, frame: DataFrame) -> Self {
        let columns = ColumnLookup::new(frame.get_column_names().iter().map(|name| name.as_str()));
        Self {
            name: name.into(),
            frame,
            columns,
        }
    }

    /// A sheet with no columns and no rows.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, DataFrame::empty())
    }

    /// Builds a sheet of text columns. `None` cells are nulls.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::DuplicateColumn`] when two headers normalize to the
    /// same name, or a DataFrame error when columns differ in length.
    pub fn from_text_columns<N, H>(name: N, columns: Vec<(H, Vec<Option<String>>)>) -> Result<Self>
    where
        N: Into<String>,
        H: AsRef<str>,
    {
        let built = columns
            .into_iter()
            .map(|(header, values)| {
                let header = normalize_header(header.as_ref());
                Series::new(header.as_str().into(), values).into_column()
            })
            .collect();
        Self::from_columns(name, built)
    }

    /// Builds a sheet from already-named columns, rejecting names that
    /// collide after normalization.
    pub(crate) fn from_columns(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(lookup_key(column.name())) {
                return Err(IngestError::DuplicateColumn {
                    sheet: name,
                    column: normalize_header(column.name()),
                });
            }
        }
        let frame = DataFrame::new(columns)?;
        Ok(Self::new(name, frame))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0
    }

    /// Resolves a column alias to the frame's column name.
    pub fn column_name(&self, alias: &str) -> Option<&str> {
        self.columns.get(alias)
    }

    /// Raw cell value, or `Null` when the column is absent or the row is out of range.
    pub fn value(&self, alias: &str, row: usize) -> AnyValue<'_> {
        self.column_name(alias)
            .and_then(|name| self.frame.column(name).ok())
            .and_then(|column| column.get(row).ok())
            .unwrap_or(AnyValue::Null)
    }

    /// First non-blank cell among `aliases`, in alias order.
    pub fn cell(&self, aliases: &[&str], row: usize) -> Option<AnyValue<'_>> {
        aliases
            .iter()
            .map(|alias| self.value(alias, row))
            .find(|value| any_to_string_non_empty(value.clone()).is_some())
    }

    /// Trimmed text of the first non-blank cell among `aliases`.
    pub fn text(&self, aliases: &[&str], row: usize) -> Option<String> {
        self.cell(aliases, row).and_then(any_to_string_non_empty)
    }

    /// Text of the first non-blank cell, or `default` when every alias is blank.
    pub fn text_or(&self, aliases: &[&str], row: usize, default: &str) -> String {
        self.text(aliases, row)
            .unwrap_or_else(|| default.to_string())
    }

    /// Non-negative count from the first non-blank cell; 0 when absent or non-numeric.
    pub fn count(&self, aliases: &[&str], row: usize) -> u64 {
        self.cell(aliases, row).map_or(0, any_to_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(String::from)).collect()
    }

    fn sample() -> Sheet {
        Sheet::from_text_columns(
            "Query Report - Cumulative",
            vec![
                ("Subject Name", text(&[Some("S-001"), None, Some("  ")])),
                ("Site Number", text(&[None, Some("101"), Some("102")])),
                ("Site ID", text(&[Some("SITE-9"), Some("SITE-8"), None])),
                ("# Days Since Open ", text(&[Some("12"), Some("x"), None])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("\u{feff}  Form  "), "Form");
        assert_eq!(normalize_header("# Days   Since Open"), "# Days Since Open");
        assert_eq!(normalize_header("   "), "");
    }

    #[test]
    fn test_column_lookup_is_case_insensitive() {
        let sheet = sample();
        assert_eq!(sheet.column_name("subject name"), Some("Subject Name"));
        assert_eq!(sheet.column_name("# days since open"), Some("# Days Since Open"));
        assert_eq!(sheet.column_name("Region"), None);
    }

    #[test]
    fn test_first_non_blank_alias_wins() {
        let sheet = sample();
        let aliases = ["Site Number", "Site ID"];
        assert_eq!(sheet.text(&aliases, 0), Some("SITE-9".to_string()));
        assert_eq!(sheet.text(&aliases, 1), Some("101".to_string()));
        assert_eq!(sheet.text(&aliases, 2), Some("102".to_string()));
    }

    #[test]
    fn test_blank_and_missing_cells() {
        let sheet = sample();
        assert_eq!(sheet.text(&["Subject Name"], 1), None);
        assert_eq!(sheet.text(&["Subject Name"], 2), None);
        assert_eq!(sheet.text_or(&["Region"], 0, "Unknown"), "Unknown");
        assert_eq!(sheet.text(&["Subject Name"], 99), None);
    }

    #[test]
    fn test_count_coercion() {
        let sheet = sample();
        let aliases = ["# Days Since Open"];
        assert_eq!(sheet.count(&aliases, 0), 12);
        assert_eq!(sheet.count(&aliases, 1), 0);
        assert_eq!(sheet.count(&aliases, 2), 0);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let result = Sheet::from_text_columns(
            "SDV",
            vec![("Site", text(&[Some("1")])), ("site ", text(&[Some("2")]))],
        );
        assert!(matches!(result, Err(IngestError::DuplicateColumn { .. })));
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::empty("Missing Visits");
        assert!(sheet.is_empty());
        assert_eq!(sheet.name(), "Missing Visits");
        assert_eq!(sheet.text(&["Subject"], 0), None);
    }
}
