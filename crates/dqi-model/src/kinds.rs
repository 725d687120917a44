//! Source file kinds.
//!
//! Every study ships up to nine workbook kinds. The declaration order of
//! [`SourceKind`] is the classification order: when a filename matches more
//! than one kind, the earliest kind wins.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// CPID EDC metrics: queries, SDV and PI signatures.
    CpidEdcMetrics,
    /// SAE dashboard with DM and Safety review sheets.
    SaeDashboard,
    /// Visit projection tracker (missing visits).
    VisitProjection,
    /// Missing lab names and reference ranges.
    MissingLab,
    /// Missing pages report.
    MissingPages,
    /// Global coding report for MedDRA terms.
    CodingMeddra,
    /// Global coding report for WHO Drug Dictionary terms.
    CodingWhodd,
    /// Compiled external data reconciliation report.
    Edrr,
    /// Inactivated forms listing.
    InactivatedForms,
}

impl SourceKind {
    /// All kinds in classification order.
    pub const ALL: [SourceKind; 9] = [
        SourceKind::CpidEdcMetrics,
        SourceKind::SaeDashboard,
        SourceKind::VisitProjection,
        SourceKind::MissingLab,
        SourceKind::MissingPages,
        SourceKind::CodingMeddra,
        SourceKind::CodingWhodd,
        SourceKind::Edrr,
        SourceKind::InactivatedForms,
    ];

    /// Key used for this kind in `extractionStats.filesProcessed`.
    pub fn label(self) -> &'static str {
        match self {
            SourceKind::CpidEdcMetrics => "CPID_EDC_Metrics",
            SourceKind::SaeDashboard => "SAE_Dashboard",
            SourceKind::VisitProjection => "Visit_Projection",
            SourceKind::MissingLab => "Lab_Issues",
            SourceKind::MissingPages => "Missing_Pages",
            SourceKind::CodingMeddra => "Coding_MedDRA",
            SourceKind::CodingWhodd => "Coding_WHODD",
            SourceKind::Edrr => "EDRR",
            SourceKind::InactivatedForms => "Inactivated",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SourceKind::CpidEdcMetrics => "CPID EDC metrics (queries, SDV, PI signatures)",
            SourceKind::SaeDashboard => "SAE dashboard (DM and Safety review)",
            SourceKind::VisitProjection => "Visit projection tracker (missing visits)",
            SourceKind::MissingLab => "Missing lab names and ranges",
            SourceKind::MissingPages => "Missing pages report",
            SourceKind::CodingMeddra => "Global coding report (MedDRA)",
            SourceKind::CodingWhodd => "Global coding report (WHODD)",
            SourceKind::Edrr => "Compiled EDRR (third-party reconciliation)",
            SourceKind::InactivatedForms => "Inactivated forms",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_declaration_order() {
        let mut sorted = SourceKind::ALL;
        sorted.sort();
        assert_eq!(sorted, SourceKind::ALL);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = SourceKind::ALL.iter().map(|kind| kind.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SourceKind::ALL.len());
    }
}
