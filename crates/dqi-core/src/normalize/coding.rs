//! Global coding reports (MedDRA and WHODD).
//!
//! Each sheet becomes one summary record. `coded` and `uncoded` come from two
//! separate status columns and are kept exactly as counted, even when they
//! overlap or do not add up to the row count.

use tracing::debug;

use dqi_ingest::Sheet;
use dqi_model::{CodingSummaryRecord, CodingSystem, Record, SourceKind};

use super::Normalizer;
use super::columns::coding;

pub struct CodingNormalizer {
    system: CodingSystem,
}

impl CodingNormalizer {
    pub fn meddra() -> Self {
        Self {
            system: CodingSystem::MedDra,
        }
    }

    pub fn whodd() -> Self {
        Self {
            system: CodingSystem::WhoDd,
        }
    }
}

impl Normalizer for CodingNormalizer {
    fn kind(&self) -> SourceKind {
        match self.system {
            CodingSystem::MedDra => SourceKind::CodingMeddra,
            CodingSystem::WhoDd => SourceKind::CodingWhodd,
        }
    }

    fn rows_key(&self, _sheet: &str) -> &'static str {
        match self.system {
            CodingSystem::MedDra => coding::MEDDRA_ROWS_KEY,
            CodingSystem::WhoDd => coding::WHODD_ROWS_KEY,
        }
    }

    fn normalize(&self, sheet: &Sheet, study: &str) -> Vec<Record> {
        let total_terms = sheet.height() as u64;
        let coded = count_equal(sheet, coding::CODING_STATUS, coding::CODED_TERM);
        let uncoded = count_equal(sheet, coding::REQUIRE_CODING, coding::REQUIRES_CODING);
        if coded + uncoded > total_terms {
            debug!(
                sheet = sheet.name(),
                total_terms,
                coded,
                uncoded,
                "coded and uncoded counts overlap"
            );
        }
        vec![Record::CodingSummary(CodingSummaryRecord {
            study: study.to_string(),
            coding_system: self.system,
            total_terms,
            coded,
            uncoded,
        })]
    }
}

/// Rows whose cell equals `expected` exactly; 0 when the column is absent.
fn count_equal(sheet: &Sheet, aliases: &[&str], expected: &str) -> u64 {
    (0..sheet.height())
        .filter(|&row| sheet.text(aliases, row).as_deref() == Some(expected))
        .count() as u64
}
