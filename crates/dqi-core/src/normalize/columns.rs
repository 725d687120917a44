//! Sheet names and column aliases per source kind.
//!
//! Each field lists its accepted column names in priority order; the first
//! non-blank one wins. Matching is case-insensitive and whitespace-tolerant.

pub type Aliases = &'static [&'static str];

pub mod query {
    use super::Aliases;

    pub const SHEET: &str = "Query Report - Cumulative";
    pub const ROWS_KEY: &str = "queries";

    pub const REGION: Aliases = &["Region"];
    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site Number", "Site ID"];
    pub const SUBJECT: Aliases = &["Subject Name"];
    pub const STATUS: Aliases = &["Query Status"];
    pub const DAYS_OPEN: Aliases = &["# Days Since Open"];
    pub const ACTION_OWNER: Aliases = &["Action Owner"];
}

pub mod sdv {
    use super::Aliases;

    pub const SHEET: &str = "SDV";
    pub const ROWS_KEY: &str = "sdv";

    pub const REGION: Aliases = &["Region"];
    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site", "Site Number"];
    pub const SUBJECT: Aliases = &["Subject Name"];
    pub const STATUS: Aliases = &["Verification Status"];
}

pub mod signature {
    use super::Aliases;

    pub const SHEET: &str = "PI Signature Report";
    pub const ROWS_KEY: &str = "signatures";

    pub const REGION: Aliases = &["Region"];
    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site ID", "Site Number"];
    pub const SUBJECT: Aliases = &["Subject Name"];
    pub const REQUIRES_SIGNATURE: Aliases = &["Page Require Signature"];
    pub const DAYS_PENDING: Aliases = &["No. of days"];
}

pub mod sae {
    use super::Aliases;

    pub const DM_SHEET: &str = "SAE Dashboard_DM";
    pub const SAFETY_SHEET: &str = "SAE Dashboard_Safety";
    pub const DM_ROWS_KEY: &str = "sae_dm";
    pub const SAFETY_ROWS_KEY: &str = "sae_safety";

    pub const DISCREPANCY_ID: Aliases = &["Discrepancy ID"];
    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site", "Site Number"];
    pub const PATIENT: Aliases = &["Patient ID"];
    pub const REVIEW_STATUS: Aliases = &["Review Status"];
    pub const CASE_STATUS: Aliases = &["Case Status"];
}

pub mod visit {
    use super::Aliases;

    pub const SHEET: &str = "Missing Visits";
    pub const ROWS_KEY: &str = "visits";

    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site", "Site Number"];
    pub const SUBJECT: Aliases = &["Subject"];
    pub const VISIT: Aliases = &["Visit"];
    pub const DAYS_OUTSTANDING: Aliases = &["# Days Outstanding"];
}

pub mod lab {
    use super::Aliases;

    pub const ROWS_KEY: &str = "lab_issues";

    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site number", "Site"];
    pub const SUBJECT: Aliases = &["Subject"];
    pub const ISSUE: Aliases = &["Issue"];
    pub const TEST_NAME: Aliases = &["Test Name"];
}

pub mod page {
    use super::Aliases;

    pub const ROWS_KEY: &str = "missing_pages";

    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Site Number", "Site"];
    pub const SUBJECT: Aliases = &["Subject Name"];
    pub const PAGE_NAME: Aliases = &["Page Name"];
    pub const DAYS_MISSING: Aliases = &["# of Days Missing"];
}

pub mod coding {
    use super::Aliases;

    pub const MEDDRA_ROWS_KEY: &str = "coding_meddra";
    pub const WHODD_ROWS_KEY: &str = "coding_whodd";

    pub const CODING_STATUS: Aliases = &["Coding Status"];
    pub const REQUIRE_CODING: Aliases = &["Require Coding"];

    pub const CODED_TERM: &str = "Coded Term";
    pub const REQUIRES_CODING: &str = "Yes";
}

pub mod edrr {
    use super::Aliases;

    pub const ROWS_KEY: &str = "edrr";

    pub const SUBJECT: Aliases = &["Subject"];
    pub const OPEN_ISSUES: Aliases = &["Total Open issue Count per subject"];
}

pub mod inactivated {
    use super::Aliases;

    pub const ROWS_KEY: &str = "inactivated";

    pub const COUNTRY: Aliases = &["Country"];
    pub const SITE: Aliases = &["Study Site Number", "Site Number"];
    pub const SUBJECT: Aliases = &["Subject"];
    pub const FORM: Aliases = &["Form"];
}
