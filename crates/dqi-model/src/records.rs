//! Typed operational records.
//!
//! One struct per record kind, each carrying the study it was extracted from.
//! String fields hold [`UNKNOWN`] when the source cell was absent or null, and
//! count fields are unsigned so they can never go negative.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for absent or null categorical values.
pub const UNKNOWN: &str = "Unknown";

/// Review status that closes an SAE review gate.
pub const REVIEW_COMPLETED: &str = "Review Completed";

/// Case status that closes a Safety SAE case gate.
pub const CASE_CLOSED: &str = "Closed";

/// Query status counted as open.
pub const QUERY_OPEN: &str = "Open";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub study: String,
    pub region: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub query_status: String,
    pub days_since_open: u64,
    pub action_owner: String,
}

impl QueryRecord {
    pub fn is_open(&self) -> bool {
        self.query_status == QUERY_OPEN
    }
}

/// Which SAE dashboard sheet a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaeType {
    #[serde(rename = "DM")]
    Dm,
    Safety,
}

impl fmt::Display for SaeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaeType::Dm => f.write_str("DM"),
            SaeType::Safety => f.write_str("Safety"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaeRecord {
    pub study: String,
    #[serde(rename = "type")]
    pub sae_type: SaeType,
    pub discrepancy_id: String,
    pub country: String,
    pub site_id: String,
    pub patient_id: String,
    pub review_status: String,
    /// Only populated for [`SaeType::Safety`].
    pub case_status: Option<String>,
    pub is_open: bool,
}

impl SaeRecord {
    /// Derives the open flag from the review and case gates.
    ///
    /// A DM record is open until its review completes. A Safety record is open
    /// while either gate is unmet.
    pub fn derive_open(sae_type: SaeType, review_status: &str, case_status: Option<&str>) -> bool {
        let review_open = review_status != REVIEW_COMPLETED;
        match sae_type {
            SaeType::Dm => review_open,
            SaeType::Safety => review_open || case_status != Some(CASE_CLOSED),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdvRecord {
    pub study: String,
    pub region: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub verification_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    pub study: String,
    pub region: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub requires_signature: String,
    pub days_pending: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub study: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub visit: String,
    pub days_outstanding: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabIssueRecord {
    pub study: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub issue: String,
    pub test_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPageRecord {
    pub study: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub page_name: String,
    pub days_missing: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodingSystem {
    #[serde(rename = "MedDRA")]
    MedDra,
    #[serde(rename = "WHODD")]
    WhoDd,
}

impl fmt::Display for CodingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodingSystem::MedDra => f.write_str("MedDRA"),
            CodingSystem::WhoDd => f.write_str("WHODD"),
        }
    }
}

/// Per-sheet coding status summary.
///
/// `coded` and `uncoded` are counted independently from two different status
/// columns. They may overlap, and they need not add up to `total_terms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingSummaryRecord {
    pub study: String,
    pub coding_system: CodingSystem,
    pub total_terms: u64,
    pub coded: u64,
    pub uncoded: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdrrRecord {
    pub study: String,
    pub subject_id: String,
    pub open_issues: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivatedFormRecord {
    pub study: String,
    pub country: String,
    pub site_id: String,
    pub subject_id: String,
    pub form: String,
}

/// A normalized record of any kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Query(QueryRecord),
    Sae(SaeRecord),
    Sdv(SdvRecord),
    Signature(SignatureRecord),
    Visit(VisitRecord),
    LabIssue(LabIssueRecord),
    MissingPage(MissingPageRecord),
    CodingSummary(CodingSummaryRecord),
    Edrr(EdrrRecord),
    InactivatedForm(InactivatedFormRecord),
}

impl Record {
    pub fn study(&self) -> &str {
        match self {
            Record::Query(r) => &r.study,
            Record::Sae(r) => &r.study,
            Record::Sdv(r) => &r.study,
            Record::Signature(r) => &r.study,
            Record::Visit(r) => &r.study,
            Record::LabIssue(r) => &r.study,
            Record::MissingPage(r) => &r.study,
            Record::CodingSummary(r) => &r.study,
            Record::Edrr(r) => &r.study,
            Record::InactivatedForm(r) => &r.study,
        }
    }
}
