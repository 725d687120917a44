//! Compiled EDRR: open reconciliation issues per subject.

use dqi_ingest::Sheet;
use dqi_model::{EdrrRecord, Record, SourceKind};

use super::columns::edrr;
use super::{Normalizer, keyed_rows};

pub struct EdrrNormalizer;

impl Normalizer for EdrrNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::Edrr
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        edrr::ROWS_KEY
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        keyed_rows(sheet, edrr::SUBJECT)
            .map(|(row, subject_id)| {
                Record::Edrr(EdrrRecord {
                    study: study.to_string(),
                    subject_id,
                    open_issues: sheet.count(edrr::OPEN_ISSUES, row),
                })
            })
            .collect()
    }
}
