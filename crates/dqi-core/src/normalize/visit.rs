//! Visit projection tracker: missing visits.

use dqi_ingest::Sheet;
use dqi_model::{Record, SourceKind, VisitRecord};

use super::columns::visit;
use super::{Normalizer, field, keyed_rows};

pub struct VisitNormalizer;

impl Normalizer for VisitNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::VisitProjection
    }

    fn sheets(&self) -> &'static [&'static str] {
        &[visit::SHEET]
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        visit::ROWS_KEY
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        keyed_rows(sheet, visit::SUBJECT)
            .map(|(row, subject_id)| {
                Record::Visit(VisitRecord {
                    study: study.to_string(),
                    country: field(sheet, visit::COUNTRY, row),
                    site_id: field(sheet, visit::SITE, row),
                    subject_id,
                    visit: field(sheet, visit::VISIT, row),
                    days_outstanding: sheet.count(visit::DAYS_OUTSTANDING, row),
                })
            })
            .collect()
    }
}
