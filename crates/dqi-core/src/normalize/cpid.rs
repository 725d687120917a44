//! CPID EDC metrics: query log, SDV status and PI signature report.

use dqi_ingest::Sheet;
use dqi_model::{QueryRecord, Record, SdvRecord, SignatureRecord, SourceKind};

use super::columns::{query, sdv, signature};
use super::{Normalizer, field, keyed_rows};

pub struct CpidNormalizer;

impl Normalizer for CpidNormalizer {
    fn kind(&self) -> SourceKind {
        SourceKind::CpidEdcMetrics
    }

    fn sheets(&self) -> &'static [&'static str] {
        &[query::SHEET, sdv::SHEET, signature::SHEET]
    }

    fn rows_key(&self, sheet: &str) -> &'static str {
        match sheet {
            sdv::SHEET => sdv::ROWS_KEY,
            signature::SHEET => signature::ROWS_KEY,
            _ => query::ROWS_KEY,
        }
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        match sheet.name() {
            query::SHEET => normalize_queries(sheet, study),
            sdv::SHEET => normalize_sdv(sheet, study),
            signature::SHEET => normalize_signatures(sheet, study),
            _ => Vec::new(),
        }
    }
}

fn normalize_queries(sheet: &Sheet, study: &str) -> Vec<Record> {
    keyed_rows(sheet, query::SUBJECT)
        .map(|(row, subject_id)| {
            Record::Query(QueryRecord {
                study: study.to_string(),
                region: field(sheet, query::REGION, row),
                country: field(sheet, query::COUNTRY, row),
                site_id: field(sheet, query::SITE, row),
                subject_id,
                query_status: field(sheet, query::STATUS, row),
                days_since_open: sheet.count(query::DAYS_OPEN, row),
                action_owner: field(sheet, query::ACTION_OWNER, row),
            })
        })
        .collect()
}

fn normalize_sdv(sheet: &Sheet, study: &str) -> Vec<Record> {
    keyed_rows(sheet, sdv::SUBJECT)
        .map(|(row, subject_id)| {
            Record::Sdv(SdvRecord {
                study: study.to_string(),
                region: field(sheet, sdv::REGION, row),
                country: field(sheet, sdv::COUNTRY, row),
                site_id: field(sheet, sdv::SITE, row),
                subject_id,
                verification_status: field(sheet, sdv::STATUS, row),
            })
        })
        .collect()
}

fn normalize_signatures(sheet: &Sheet, study: &str) -> Vec<Record> {
    keyed_rows(sheet, signature::SUBJECT)
        .map(|(row, subject_id)| {
            Record::Signature(SignatureRecord {
                study: study.to_string(),
                region: field(sheet, signature::REGION, row),
                country: field(sheet, signature::COUNTRY, row),
                site_id: field(sheet, signature::SITE, row),
                subject_id,
                requires_signature: field(sheet, signature::REQUIRES_SIGNATURE, row),
                days_pending: sheet.count(signature::DAYS_PENDING, row),
            })
        })
        .collect()
}
