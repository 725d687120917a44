//! Missing pages report.

use dqi_ingest::Sheet;
use dqi_model::{MissingPageRecord, Record, SourceKind};

use super::columns::page;
use super::{Normalizer, field, keyed_rows};

pub struct PageNormalizer;

impl Normalizer for PageNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::MissingPages
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        page::ROWS_KEY
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        keyed_rows(sheet, page::SUBJECT)
            .map(|(row, subject_id)| {
                Record::MissingPage(MissingPageRecord {
                    study: study.to_string(),
                    country: field(sheet, page::COUNTRY, row),
                    site_id: field(sheet, page::SITE, row),
                    subject_id,
                    page_name: field(sheet, page::PAGE_NAME, row),
                    days_missing: sheet.count(page::DAYS_MISSING, row),
                })
            })
            .collect()
    }
}
