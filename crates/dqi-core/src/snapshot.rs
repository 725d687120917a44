//! Snapshot assembly.
//!
//! Pure over its inputs: the clock reading and the randomness source for the
//! simulated trend are passed in by the caller.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

use dqi_model::{ExtractionStats, GOVERNANCE_STATEMENT, RecordBatch, Snapshot};

use crate::aggregate::aggregate;
use crate::dqi::{components, composite_index, rounded, simulate_trend};
use crate::hierarchy::build_hierarchy;

/// Default `dataSource` text for a run over `studies` studies.
pub fn default_data_source(studies: usize) -> String {
    format!("Complete extraction from 9 file types across {studies} studies")
}

/// Builds the snapshot from the merged records of a run.
pub fn assemble<R: Rng + ?Sized>(
    batch: &RecordBatch,
    extraction_stats: ExtractionStats,
    data_source: String,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Snapshot {
    let metrics = aggregate(batch);
    let scores = components(&metrics);
    let current_dqi = composite_index(&scores);
    let dqi_trend = simulate_trend(current_dqi, now.date_naive(), rng);

    Snapshot {
        last_updated: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        data_source,
        governance_statement: GOVERNANCE_STATEMENT.to_string(),
        extraction_stats,
        queries: metrics.queries,
        saes: metrics.saes,
        visits: metrics.visits,
        lab: metrics.lab,
        pages: metrics.pages,
        coding: metrics.coding,
        sdv: metrics.sdv,
        signatures: metrics.signatures,
        edrr: metrics.edrr,
        inactivated: metrics.inactivated,
        regions: build_hierarchy(&batch.queries),
        dqi_trend,
        dqi_trend_simulated: true,
        dqi_components: rounded(&scores),
        current_dqi,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn empty_run_snapshot() {
        let stats = ExtractionStats {
            studies_processed: 2,
            ..ExtractionStats::default()
        };
        let snapshot = assemble(
            &RecordBatch::new(),
            stats,
            default_data_source(2),
            now(),
            &mut StdRng::seed_from_u64(3),
        );

        assert_eq!(snapshot.last_updated, "2026-10-19T08:30:00Z");
        assert_eq!(
            snapshot.data_source,
            "Complete extraction from 9 file types across 2 studies"
        );
        assert_eq!(snapshot.current_dqi, 100.0);
        assert!(snapshot.regions.is_empty());
        assert_eq!(snapshot.dqi_trend.len(), 7);
        assert_eq!(snapshot.dqi_trend[6].date, "2026-10-19");
        assert!(snapshot.dqi_trend_simulated);
        assert_eq!(snapshot.extraction_stats.studies_processed, 2);
    }

    #[test]
    fn snapshot_serializes_dashboard_keys() {
        let snapshot = assemble(
            &RecordBatch::new(),
            ExtractionStats::default(),
            default_data_source(0),
            now(),
            &mut StdRng::seed_from_u64(3),
        );
        let json = serde_json::to_value(&snapshot).unwrap();
        for key in [
            "lastUpdated",
            "dataSource",
            "governanceStatement",
            "extractionStats",
            "queries",
            "saes",
            "visits",
            "lab",
            "pages",
            "coding",
            "sdv",
            "signatures",
            "edrr",
            "inactivated",
            "regions",
            "dqiTrend",
            "dqiTrendSimulated",
            "dqiComponents",
            "currentDQI",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["queries"]["aging"]["0-7 days"], 0);
        assert_eq!(json["coding"]["totalUncoded"], 0);
        assert_eq!(json["dqiComponents"]["labCoding"], 100.0);
    }
}
