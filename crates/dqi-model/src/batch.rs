//! Record collections.
//!
//! A [`RecordBatch`] holds one vector per record kind. Each study extraction
//! fills its own batch; the run merges the batches in study order.

use serde::{Deserialize, Serialize};

use crate::records::{
    CodingSummaryRecord, CodingSystem, EdrrRecord, InactivatedFormRecord, LabIssueRecord,
    MissingPageRecord, QueryRecord, Record, SaeRecord, SdvRecord, SignatureRecord, VisitRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBatch {
    pub queries: Vec<QueryRecord>,
    pub saes: Vec<SaeRecord>,
    pub sdv: Vec<SdvRecord>,
    pub signatures: Vec<SignatureRecord>,
    pub visits: Vec<VisitRecord>,
    pub lab_issues: Vec<LabIssueRecord>,
    pub missing_pages: Vec<MissingPageRecord>,
    pub coding: Vec<CodingSummaryRecord>,
    pub edrr: Vec<EdrrRecord>,
    pub inactivated: Vec<InactivatedFormRecord>,
}

impl RecordBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes a record to the collection of its kind.
    pub fn push(&mut self, record: Record) {
        match record {
            Record::Query(r) => self.queries.push(r),
            Record::Sae(r) => self.saes.push(r),
            Record::Sdv(r) => self.sdv.push(r),
            Record::Signature(r) => self.signatures.push(r),
            Record::Visit(r) => self.visits.push(r),
            Record::LabIssue(r) => self.lab_issues.push(r),
            Record::MissingPage(r) => self.missing_pages.push(r),
            Record::CodingSummary(r) => self.coding.push(r),
            Record::Edrr(r) => self.edrr.push(r),
            Record::InactivatedForm(r) => self.inactivated.push(r),
        }
    }

    /// Moves every record of `other` to the end of this batch, keeping order.
    pub fn append(&mut self, other: &mut RecordBatch) {
        self.queries.append(&mut other.queries);
        self.saes.append(&mut other.saes);
        self.sdv.append(&mut other.sdv);
        self.signatures.append(&mut other.signatures);
        self.visits.append(&mut other.visits);
        self.lab_issues.append(&mut other.lab_issues);
        self.missing_pages.append(&mut other.missing_pages);
        self.coding.append(&mut other.coding);
        self.edrr.append(&mut other.edrr);
        self.inactivated.append(&mut other.inactivated);
    }

    /// Total number of records across all kinds.
    pub fn len(&self) -> usize {
        self.queries.len()
            + self.saes.len()
            + self.sdv.len()
            + self.signatures.len()
            + self.visits.len()
            + self.lab_issues.len()
            + self.missing_pages.len()
            + self.coding.len()
            + self.edrr.len()
            + self.inactivated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coding summaries for one coding system.
    pub fn coding_for(&self, system: CodingSystem) -> impl Iterator<Item = &CodingSummaryRecord> {
        self.coding
            .iter()
            .filter(move |record| record.coding_system == system)
    }
}

impl Extend<Record> for RecordBatch {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}

impl FromIterator<Record> for RecordBatch {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut batch = RecordBatch::new();
        batch.extend(iter);
        batch
    }
}
