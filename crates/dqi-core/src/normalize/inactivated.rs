//! Inactivated forms listing.

use dqi_ingest::Sheet;
use dqi_model::{InactivatedFormRecord, Record, SourceKind};

use super::columns::inactivated;
use super::{Normalizer, field, keyed_rows};

pub struct InactivatedNormalizer;

impl Normalizer for InactivatedNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::InactivatedForms
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        inactivated::ROWS_KEY
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        keyed_rows(sheet, inactivated::SUBJECT)
            .map(|(row, subject_id)| {
                Record::InactivatedForm(InactivatedFormRecord {
                    study: study.to_string(),
                    country: field(sheet, inactivated::COUNTRY, row),
                    site_id: field(sheet, inactivated::SITE, row),
                    subject_id,
                    form: field(sheet, inactivated::FORM, row),
                })
            })
            .collect()
    }
}
