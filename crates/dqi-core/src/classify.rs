//! Filename classification into source kinds.
//!
//! Rules are checked in [`SourceKind::ALL`] order against the lowercased
//! file stem; the first match wins. Overlapping names therefore resolve
//! deterministically, e.g. `sae_missing_lab` is an SAE dashboard.

use dqi_model::SourceKind;

/// One classification rule: every token in `all` must appear, or any token in `any_of`.
#[derive(Debug, Clone, Copy)]
pub struct FilenameRule {
    pub kind: SourceKind,
    pub all: &'static [&'static str],
    pub any_of: &'static [&'static [&'static str]],
}

impl FilenameRule {
    pub fn matches(&self, stem_lower: &str) -> bool {
        let all = !self.all.is_empty() && self.all.iter().all(|token| stem_lower.contains(token));
        all || self
            .any_of
            .iter()
            .any(|tokens| tokens.iter().all(|token| stem_lower.contains(token)))
    }

    /// Human-readable form of the rule, e.g. `cpid + edc`.
    pub fn describe(&self) -> String {
        let mut alternatives = Vec::new();
        if !self.all.is_empty() {
            alternatives.push(self.all.join(" + "));
        }
        alternatives.extend(self.any_of.iter().map(|tokens| tokens.join(" + ")));
        alternatives.join(" | ")
    }
}

pub const RULES: [FilenameRule; 9] = [
    FilenameRule {
        kind: SourceKind::CpidEdcMetrics,
        all: &["cpid", "edc"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::SaeDashboard,
        all: &["sae"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::VisitProjection,
        all: &["visit", "projection"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::MissingLab,
        all: &["missing", "lab"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::MissingPages,
        all: &["missing", "page"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::CodingMeddra,
        all: &["meddra"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::CodingWhodd,
        all: &["whodd"],
        any_of: &[&["coding", "who"]],
    },
    FilenameRule {
        kind: SourceKind::Edrr,
        all: &["edrr"],
        any_of: &[],
    },
    FilenameRule {
        kind: SourceKind::InactivatedForms,
        all: &["inactivated"],
        any_of: &[],
    },
];

/// Classifies a workbook by its stem. `None` means the file is not a known kind.
pub fn classify(stem: &str) -> Option<SourceKind> {
    let lower = stem.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.matches(&lower))
        .map(|rule| rule.kind)
}

/// The rule for one kind.
pub fn rule_for(kind: SourceKind) -> &'static FilenameRule {
    // RULES holds one entry per kind in ALL order.
    &RULES[kind as usize]
}
