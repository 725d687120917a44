//! Missing lab names and reference ranges.

use dqi_ingest::Sheet;
use dqi_model::{LabIssueRecord, Record, SourceKind};

use super::columns::lab;
use super::{Normalizer, field, keyed_rows};

pub struct LabNormalizer;

impl Normalizer for LabNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::MissingLab
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        lab::ROWS_KEY
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        keyed_rows(sheet, lab::SUBJECT)
            .map(|(row, subject_id)| {
                Record::LabIssue(LabIssueRecord {
                    study: study.to_string(),
                    country: field(sheet, lab::COUNTRY, row),
                    site_id: field(sheet, lab::SITE, row),
                    subject_id,
                    issue: field(sheet, lab::ISSUE, row),
                    test_name: field(sheet, lab::TEST_NAME, row),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::fixtures::sheet;

    #[test]
    fn lab_issues_any_sheet() {
        let sheet = sheet(
            "Missing Lab Ranges",
            &[
                ("subject", &[Some("S-1"), None]),
                ("SITE NUMBER", &[Some("42"), Some("43")]),
                ("Issue", &[Some("Missing range"), Some("Missing name")]),
            ],
        );
        let records = LabNormalizer.normalize(&sheet, "Study 1");
        assert_eq!(records.len(), 1);
        let Record::LabIssue(issue) = &records[0] else {
            panic!("expected lab issue");
        };
        assert_eq!(issue.site_id, "42");
        assert_eq!(issue.issue, "Missing range");
        assert_eq!(issue.test_name, "Unknown");
    }
}
