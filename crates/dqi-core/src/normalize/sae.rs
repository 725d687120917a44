//! SAE dashboard: DM and Safety review sheets.

use dqi_ingest::Sheet;
use dqi_model::{Record, SaeRecord, SaeType, SourceKind};

use super::columns::sae;
use super::{Normalizer, field, keyed_rows};

pub struct SaeNormalizer;

impl Normalizer for SaeNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::SaeDashboard
    }

    fn sheets(&self) -> &'static [&'static str] {
        &[sae::DM_SHEET, sae::SAFETY_SHEET]
    }

    fn rows_key(&self, sheet: &str) -> &'static str {
        if sheet == sae::SAFETY_SHEET {
            sae::SAFETY_ROWS_KEY
        } else {
            sae::DM_ROWS_KEY
        }
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        let sae_type = match sheet.name() {
            sae::DM_SHEET => SaeType::Dm,
            sae::SAFETY_SHEET => SaeType::Safety,
            _ => return Vec::new(),
        };
        keyed_rows(sheet, sae::PATIENT)
            .map(|(row, patient_id)| {
                let review_status = field(sheet, sae::REVIEW_STATUS, row);
                let case_status = match sae_type {
                    SaeType::Dm => None,
                    SaeType::Safety => Some(field(sheet, sae::CASE_STATUS, row)),
                };
                let is_open =
                    SaeRecord::derive_open(sae_type, &review_status, case_status.as_deref());
                Record::Sae(SaeRecord {
                    study: study.to_string(),
                    sae_type,
                    discrepancy_id: field(sheet, sae::DISCREPANCY_ID, row),
                    country: field(sheet, sae::COUNTRY, row),
                    site_id: field(sheet, sae::SITE, row),
                    patient_id,
                    review_status,
                    case_status,
                    is_open,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::fixtures::sheet;

    fn saes(records: Vec<Record>) -> Vec<SaeRecord> {
        records
            .into_iter()
            .map(|record| match record {
                Record::Sae(sae) => sae,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    #[test]
    fn dm_and_safety_open_flags() {
        let dm = sheet(
            sae::DM_SHEET,
            &[
                ("Patient ID", &[Some("P-1")]),
                ("Review Status", &[Some("Pending")]),
                ("Site", &[Some("101")]),
            ],
        );
        let safety = sheet(
            sae::SAFETY_SHEET,
            &[
                ("Patient ID", &[Some("P-2")]),
                ("Review Status", &[Some("Review Completed")]),
                ("Case Status", &[Some("Open")]),
            ],
        );

        let dm_records = saes(SaeNormalizer.normalize(&dm, "Study 1"));
        let safety_records = saes(SaeNormalizer.normalize(&safety, "Study 1"));

        assert_eq!(dm_records[0].sae_type, SaeType::Dm);
        assert!(dm_records[0].is_open);
        assert_eq!(dm_records[0].case_status, None);

        assert_eq!(safety_records[0].sae_type, SaeType::Safety);
        assert!(safety_records[0].is_open);
        assert_eq!(safety_records[0].case_status.as_deref(), Some("Open"));
        assert_eq!(safety_records[0].site_id, "Unknown");
    }

    #[test]
    fn safety_closed_only_when_both_gates_met() {
        let safety = sheet(
            sae::SAFETY_SHEET,
            &[
                ("Patient ID", &[Some("P-1"), Some("P-2"), None]),
                (
                    "Review Status",
                    &[Some("Review Completed"), Some("Review Completed"), None],
                ),
                ("Case Status", &[Some("Closed"), None, Some("Closed")]),
            ],
        );
        let records = saes(SaeNormalizer.normalize(&safety, "Study 1"));
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_open);
        // A missing case status defaults to Unknown, which is not Closed.
        assert!(records[1].is_open);
        assert_eq!(records[1].case_status.as_deref(), Some("Unknown"));
    }

    #[test]
    fn rows_keys() {
        assert_eq!(SaeNormalizer.rows_key(sae::DM_SHEET), "sae_dm");
        assert_eq!(SaeNormalizer.rows_key(sae::SAFETY_SHEET), "sae_safety");
    }
}
