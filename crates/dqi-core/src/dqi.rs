//! Composite data quality index.
//!
//! Five sub-scores in `[0, 100]` are combined with fixed weights into one
//! index, clamped to `[0, 100]` and rounded to one decimal. With no records at
//! all every sub-score is 100, and so is the index.

use chrono::{NaiveDate, TimeDelta};
use rand::Rng;

use dqi_model::{DqiComponents, TrendPoint};

use crate::aggregate::{RunMetrics, round1};

pub const SAFETY_WEIGHT: f64 = 0.30;
pub const QUERY_WEIGHT: f64 = 0.25;
pub const COMPLETENESS_WEIGHT: f64 = 0.20;
pub const LAB_CODING_WEIGHT: f64 = 0.15;
pub const VERIFICATION_WEIGHT: f64 = 0.10;

/// Number of weekly points in the simulated trend, ending at the run date.
pub const TREND_WEEKS: i64 = 7;

/// Share of `total` that is no longer open, as a percentage; 100 when `total` is 0.
fn resolved_share(open: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        (total - open) as f64 / total as f64 * 100.0
    }
}

/// Unrounded sub-scores.
pub fn components(metrics: &RunMetrics) -> DqiComponents {
    let safety = resolved_share(metrics.saes.open, metrics.saes.total);
    let query = resolved_share(metrics.queries.open, metrics.queries.total);

    let missing = (metrics.visits.total_missing + metrics.pages.total_missing) as f64;
    let completeness = (100.0 - missing / 10.0).max(0.0);

    let lab_coding_issues = metrics.lab.total_issues as f64 + metrics.coding.total_uncoded as f64;
    let lab_coding = (100.0 - lab_coding_issues / 5.0).max(0.0);

    let verification = resolved_share(metrics.sdv.pending, metrics.sdv.total);
    let verification = (verification - metrics.signatures.pending as f64).max(0.0);

    DqiComponents {
        safety,
        query,
        completeness,
        lab_coding,
        verification,
    }
}

/// Weighted index, clamped to `[0, 100]` and rounded to one decimal.
pub fn composite_index(components: &DqiComponents) -> f64 {
    let index = SAFETY_WEIGHT * components.safety
        + QUERY_WEIGHT * components.query
        + COMPLETENESS_WEIGHT * components.completeness
        + LAB_CODING_WEIGHT * components.lab_coding
        + VERIFICATION_WEIGHT * components.verification;
    round1(index.clamp(0.0, 100.0))
}

/// Sub-scores rounded for display.
pub fn rounded(components: &DqiComponents) -> DqiComponents {
    DqiComponents {
        safety: round1(components.safety),
        query: round1(components.query),
        completeness: round1(components.completeness),
        lab_coding: round1(components.lab_coding),
        verification: round1(components.verification),
    }
}

/// Simulated weekly history ending at `today`.
///
/// Point `i` weeks back is `current - 1.5 * i` plus uniform noise in
/// `[-2, 2)`, clamped to `[50, 100]`. The values are synthetic.
pub fn simulate_trend<R: Rng + ?Sized>(current: f64, today: NaiveDate, rng: &mut R) -> Vec<TrendPoint> {
    (0..TREND_WEEKS)
        .rev()
        .map(|weeks_back| {
            let date = today - TimeDelta::weeks(weeks_back);
            let noise: f64 = rng.gen_range(-2.0..2.0);
            let value = (current - 1.5 * weeks_back as f64 + noise).clamp(50.0, 100.0);
            TrendPoint {
                date: date.format("%Y-%m-%d").to_string(),
                value: round1(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use dqi_model::{QueryMetrics, SaeMetrics, SdvMetrics, SignatureMetrics};

    use super::*;

    #[test]
    fn empty_input_scores_100() {
        let components = components(&RunMetrics::default());
        assert_eq!(components, DqiComponents::default());
        assert_eq!(composite_index(&components), 100.0);
    }

    #[test]
    fn weighted_combination() {
        let metrics = RunMetrics {
            saes: SaeMetrics {
                total: 2,
                open: 2,
                ..SaeMetrics::default()
            },
            queries: QueryMetrics {
                total: 10,
                open: 6,
                closed: 4,
                ..QueryMetrics::default()
            },
            ..RunMetrics::default()
        };
        let components = components(&metrics);
        assert_eq!(components.safety, 0.0);
        assert_eq!(components.query, 40.0);
        // 0.30*0 + 0.25*40 + 0.20*100 + 0.15*100 + 0.10*100
        assert_eq!(composite_index(&components), 55.0);
    }

    #[test]
    fn verification_subtracts_pending_signatures() {
        let metrics = RunMetrics {
            sdv: SdvMetrics {
                total: 4,
                verified: 3,
                pending: 1,
                verification_rate: 75.0,
            },
            signatures: SignatureMetrics {
                pending: 80,
                overdue: 0,
            },
            ..RunMetrics::default()
        };
        assert_eq!(components(&metrics).verification, 0.0);
    }

    #[test]
    fn trend_is_reproducible_with_a_seed() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let first = simulate_trend(80.0, today, &mut StdRng::seed_from_u64(7));
        let second = simulate_trend(80.0, today, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert_eq!(first[0].date, "2026-01-18");
        assert_eq!(first[6].date, "2026-03-01");
        for (weeks_back, point) in (0..7).rev().zip(&first) {
            let base = 80.0 - 1.5 * f64::from(weeks_back);
            assert!((point.value - base).abs() <= 2.05, "{point:?}");
        }
    }

    #[test]
    fn trend_is_clamped() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for point in simulate_trend(100.0, today, &mut rng) {
            assert!((50.0..=100.0).contains(&point.value));
        }
        for point in simulate_trend(0.0, today, &mut rng) {
            assert_eq!(point.value, 50.0);
        }
    }

    proptest! {
        #[test]
        fn index_is_bounded(
            sae_total in 0usize..500,
            sae_open_pct in 0usize..=100,
            query_total in 0usize..5000,
            query_open_pct in 0usize..=100,
            missing in 0usize..5000,
            lab in 0usize..2000,
            uncoded in 0u64..2000,
            sdv_total in 0usize..500,
            signatures in 0usize..300,
        ) {
            let mut metrics = RunMetrics::default();
            metrics.saes.total = sae_total;
            metrics.saes.open = sae_total * sae_open_pct / 100;
            metrics.queries.total = query_total;
            metrics.queries.open = query_total * query_open_pct / 100;
            metrics.visits.total_missing = missing;
            metrics.lab.total_issues = lab;
            metrics.coding.total_uncoded = uncoded;
            metrics.sdv.total = sdv_total;
            metrics.sdv.pending = sdv_total / 2;
            metrics.signatures.pending = signatures;

            let components = components(&metrics);
            let index = composite_index(&components);
            prop_assert!((0.0..=100.0).contains(&index));
            for score in [
                components.safety,
                components.query,
                components.completeness,
                components.lab_coding,
                components.verification,
            ] {
                prop_assert!((0.0..=100.0).contains(&score));
            }
        }
    }
}
