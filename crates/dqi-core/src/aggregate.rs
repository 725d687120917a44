//! Run-level metrics over the merged record collections.

use std::collections::HashSet;

use dqi_model::{
    CodingMetrics, CodingSystem, CodingSystemMetrics, EdrrMetrics, InactivatedMetrics,
    LabMetrics, PageMetrics, QueryAging, QueryMetrics, QueryRecord, RecordBatch, SaeMetrics,
    SdvMetrics, SdvRecord, SignatureMetrics, SignatureRecord, VisitMetrics, VisitRecord,
};

/// Days outstanding above which a missing visit is overdue.
pub const VISIT_OVERDUE_DAYS: u64 = 30;

/// Days pending above which a signature is overdue.
pub const SIGNATURE_OVERDUE_DAYS: u64 = 45;

/// Flat metrics for every record kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
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
}

/// Rounds to one decimal place, half away from zero.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole * 100`, rounded to one decimal; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 / whole as f64 * 100.0)
    }
}

pub fn aggregate(batch: &RecordBatch) -> RunMetrics {
    RunMetrics {
        queries: query_metrics(&batch.queries),
        saes: sae_metrics(batch),
        visits: visit_metrics(&batch.visits),
        lab: LabMetrics {
            total_issues: batch.lab_issues.len(),
        },
        pages: PageMetrics {
            total_missing: batch.missing_pages.len(),
        },
        coding: coding_metrics(batch),
        sdv: sdv_metrics(&batch.sdv),
        signatures: signature_metrics(&batch.signatures),
        edrr: EdrrMetrics {
            open_issues: batch
                .edrr
                .iter()
                .map(|r| r.open_issues)
                .fold(0, u64::saturating_add),
        },
        inactivated: InactivatedMetrics {
            total_forms: batch.inactivated.len(),
        },
    }
}

pub fn query_metrics(queries: &[QueryRecord]) -> QueryMetrics {
    let total = queries.len();
    let open = queries.iter().filter(|q| q.is_open()).count();
    let closed = total - open;
    QueryMetrics {
        total,
        open,
        closed,
        resolution_rate: percentage(closed, total),
        aging: query_aging(queries),
    }
}

/// Histogram of days since open over all queries, inclusive buckets.
pub fn query_aging(queries: &[QueryRecord]) -> QueryAging {
    let mut aging = QueryAging::default();
    for query in queries {
        match query.days_since_open {
            0..=7 => aging.days_0_7 += 1,
            8..=14 => aging.days_8_14 += 1,
            15..=30 => aging.days_15_30 += 1,
            _ => aging.over_30 += 1,
        }
    }
    aging
}

fn sae_metrics(batch: &RecordBatch) -> SaeMetrics {
    let open: Vec<_> = batch.saes.iter().filter(|sae| sae.is_open).collect();
    let patients: HashSet<&str> = open.iter().map(|sae| sae.patient_id.as_str()).collect();
    let sites: HashSet<&str> = open.iter().map(|sae| sae.site_id.as_str()).collect();
    SaeMetrics {
        total: batch.saes.len(),
        open: open.len(),
        patients_with_open_sae: patients.len(),
        sites_with_open_sae: sites.len(),
    }
}

fn visit_metrics(visits: &[VisitRecord]) -> VisitMetrics {
    VisitMetrics {
        total_missing: visits.len(),
        overdue_30_days: visits
            .iter()
            .filter(|visit| visit.days_outstanding > VISIT_OVERDUE_DAYS)
            .count(),
    }
}

fn coding_metrics(batch: &RecordBatch) -> CodingMetrics {
    let system = |system: CodingSystem| {
        batch
            .coding_for(system)
            .fold(CodingSystemMetrics::default(), |acc, record| {
                CodingSystemMetrics {
                    total: acc.total.saturating_add(record.total_terms),
                    uncoded: acc.uncoded.saturating_add(record.uncoded),
                }
            })
    };
    let meddra = system(CodingSystem::MedDra);
    let whodd = system(CodingSystem::WhoDd);
    CodingMetrics {
        meddra,
        whodd,
        total_uncoded: meddra.uncoded.saturating_add(whodd.uncoded),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn sdv_metrics(sdv: &[SdvRecord]) -> SdvMetrics {
    let total = sdv.len();
    let verified = sdv
        .iter()
        .filter(|r| contains_ignore_case(&r.verification_status, "verif"))
        .count();
    SdvMetrics {
        total,
        verified,
        pending: total - verified,
        verification_rate: percentage(verified, total),
    }
}

fn signature_metrics(signatures: &[SignatureRecord]) -> SignatureMetrics {
    SignatureMetrics {
        pending: signatures
            .iter()
            .filter(|r| contains_ignore_case(&r.requires_signature, "yes"))
            .count(),
        overdue: signatures
            .iter()
            .filter(|r| r.days_pending > SIGNATURE_OVERDUE_DAYS)
            .count(),
    }
}
