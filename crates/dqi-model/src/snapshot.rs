//! Snapshot document.
//!
//! The snapshot is the single output of a run: flat per-kind metrics, the
//! region → country → site query tree, the composite index and run metadata.
//! Field names follow the dashboard's JSON contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kinds::SourceKind;

/// Fixed disclosure carried by every snapshot.
pub const GOVERNANCE_STATEMENT: &str =
    "AI components operate exclusively on validated, pre-computed metrics.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub last_updated: String,
    pub data_source: String,
    pub governance_statement: String,
    pub extraction_stats: ExtractionStats,
    pub queries: QueryMetrics,
    pub saes: SaeMetrics,
    pub visits: VisitMetrics,
    pub lab: LabMetrics,
    pub pages: PageMetrics,
    pub coding: CodingMetrics,
    pub sdv: SdvMetrics,
    pub signatures: SignatureMetrics,
    pub edrr: EdrrMetrics,
    pub inactivated: InactivatedMetrics,
    pub regions: BTreeMap<String, RegionNode>,
    pub dqi_trend: Vec<TrendPoint>,
    /// Always true: trend points are synthesized, not measured.
    pub dqi_trend_simulated: bool,
    pub dqi_components: DqiComponents,
    #[serde(rename = "currentDQI")]
    pub current_dqi: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    pub studies_processed: usize,
    /// Files opened per source kind label.
    pub files_processed: BTreeMap<String, usize>,
    /// Source rows read per sheet group, including rows skipped for a null key.
    pub records_extracted: BTreeMap<String, usize>,
    pub errors: usize,
}

/// One extraction failure below run level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionErrorEntry {
    pub study: String,
    /// Kind of the failed file; `None` when the study itself could not be listed.
    pub kind: Option<SourceKind>,
    pub message: String,
}

impl ExtractionErrorEntry {
    /// Kind label, or `"study"` for study-level failures.
    pub fn kind_label(&self) -> &'static str {
        self.kind.map_or("study", SourceKind::label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMetrics {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    pub resolution_rate: f64,
    pub aging: QueryAging,
}

/// Days-since-open histogram with inclusive bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAging {
    #[serde(rename = "0-7 days")]
    pub days_0_7: usize,
    #[serde(rename = "8-14 days")]
    pub days_8_14: usize,
    #[serde(rename = "15-30 days")]
    pub days_15_30: usize,
    #[serde(rename = ">30 days")]
    pub over_30: usize,
}

impl QueryAging {
    pub fn total(&self) -> usize {
        self.days_0_7 + self.days_8_14 + self.days_15_30 + self.over_30
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaeMetrics {
    pub total: usize,
    pub open: usize,
    #[serde(rename = "patientsWithOpenSAE")]
    pub patients_with_open_sae: usize,
    #[serde(rename = "sitesWithOpenSAE")]
    pub sites_with_open_sae: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitMetrics {
    #[serde(rename = "totalMissing")]
    pub total_missing: usize,
    #[serde(rename = "overdue30Days")]
    pub overdue_30_days: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabMetrics {
    pub total_issues: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    pub total_missing: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodingMetrics {
    pub meddra: CodingSystemMetrics,
    pub whodd: CodingSystemMetrics,
    pub total_uncoded: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingSystemMetrics {
    pub total: u64,
    pub uncoded: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdvMetrics {
    pub total: usize,
    pub verified: usize,
    pub pending: usize,
    pub verification_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureMetrics {
    pub pending: usize,
    pub overdue: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdrrMetrics {
    pub open_issues: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactivatedMetrics {
    pub total_forms: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    pub countries: BTreeMap<String, CountryNode>,
    pub total_countries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryNode {
    pub sites: BTreeMap<String, SiteNode>,
    pub total_sites: usize,
    pub total_queries: usize,
    pub open_queries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteNode {
    pub total_queries: usize,
    pub open_queries: usize,
    /// Distinct subjects with at least one query at this site.
    pub patients: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

/// Sub-scores feeding the composite index, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DqiComponents {
    pub safety: f64,
    pub query: f64,
    pub completeness: f64,
    pub lab_coding: f64,
    pub verification: f64,
}

impl Default for DqiComponents {
    fn default() -> Self {
        Self {
            safety: 100.0,
            query: 100.0,
            completeness: 100.0,
            lab_coding: 100.0,
            verification: 100.0,
        }
    }
}
