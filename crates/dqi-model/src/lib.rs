//! Data model for the study quality snapshot.
//!
//! Typed records produced by the normalizers, the per-run record batch, the
//! source kind catalogue, and the snapshot document handed to serializers.

pub mod batch;
pub mod kinds;
pub mod records;
pub mod snapshot;

pub use batch::RecordBatch;
pub use kinds::SourceKind;
pub use records::{
    CASE_CLOSED, CodingSummaryRecord, CodingSystem, EdrrRecord, InactivatedFormRecord,
    LabIssueRecord, MissingPageRecord, QUERY_OPEN, QueryRecord, REVIEW_COMPLETED, Record,
    SaeRecord, SaeType, SdvRecord, SignatureRecord, UNKNOWN, VisitRecord,
};
pub use snapshot::{
    CodingMetrics, CodingSystemMetrics, CountryNode, DqiComponents, EdrrMetrics,
    ExtractionErrorEntry, ExtractionStats, GOVERNANCE_STATEMENT, InactivatedMetrics, LabMetrics,
    PageMetrics, QueryAging, QueryMetrics, RegionNode, SaeMetrics, SdvMetrics, SignatureMetrics,
    SiteNode, Snapshot, TrendPoint, VisitMetrics,
};
