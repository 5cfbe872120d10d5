use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::super::domain::{DriftSnapshot, RegionTier};
use super::super::tiers::BenchmarkSet;

/// Consecutive weekly runs above the drift threshold before a tier qualifies.
const STREAK_WEEKS: usize = 8;
const STREAK_DRIFT_PCT: f64 = 15.0;
const ROLLING_WINDOW_DAYS: i64 = 30;
/// Proposed benchmarks are rounded to this coarse currency unit.
const ROUND_UNIT: f64 = 50_000.0;

/// A suggested benchmark update for one tier, with before/after values so the
/// decision is auditable and reversible. Applying it is an explicit human
/// step elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationProposal {
    pub tier: RegionTier,
    pub current_benchmark_price_per_m2: f64,
    pub proposed_benchmark_price_per_m2: f64,
    pub weighted_mean_drift_pct: f64,
    pub streak_weeks: usize,
    pub sample_count: usize,
}

pub(crate) fn tier_proposals(
    snapshots: &[DriftSnapshot],
    benchmarks: &BenchmarkSet,
    today: NaiveDate,
) -> Vec<RecalibrationProposal> {
    let mut proposals = Vec::new();

    for benchmark in benchmarks.iter() {
        let tier_snapshots: Vec<&DriftSnapshot> = snapshots
            .iter()
            .filter(|snapshot| snapshot.tier == benchmark.tier)
            .collect();
        if tier_snapshots.is_empty() {
            continue;
        }

        // Confidence-weighted mean drift per weekly run date.
        let mut by_week: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for snapshot in &tier_snapshots {
            let entry = by_week.entry(snapshot.recorded_on).or_insert((0.0, 0.0));
            entry.0 += snapshot.drift_pct * snapshot.confidence;
            entry.1 += snapshot.confidence;
        }

        let mut streak = 0usize;
        let mut streak_drift_sum = 0.0;
        for (weighted_sum, weight) in by_week.values().rev() {
            if *weight <= 0.0 {
                break;
            }
            let weekly_mean = weighted_sum / weight;
            if weekly_mean > STREAK_DRIFT_PCT {
                streak += 1;
                streak_drift_sum += weekly_mean;
            } else {
                break;
            }
        }
        if streak < STREAK_WEEKS {
            continue;
        }

        // Confidence-weighted rolling average of live prices over the last
        // thirty days becomes the proposed benchmark.
        let cutoff = today - Duration::days(ROLLING_WINDOW_DAYS);
        let mut weighted_price_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut sample_count = 0usize;
        for snapshot in &tier_snapshots {
            if snapshot.recorded_on >= cutoff && snapshot.confidence > 0.0 {
                weighted_price_sum += snapshot.live_price_per_m2 * snapshot.confidence;
                weight_sum += snapshot.confidence;
                sample_count += 1;
            }
        }
        if weight_sum <= 0.0 {
            continue;
        }

        proposals.push(RecalibrationProposal {
            tier: benchmark.tier,
            current_benchmark_price_per_m2: benchmark.baseline_price_per_m2,
            proposed_benchmark_price_per_m2: round_to_unit(weighted_price_sum / weight_sum),
            weighted_mean_drift_pct: streak_drift_sum / streak as f64,
            streak_weeks: streak,
            sample_count,
        });
    }

    proposals
}

fn round_to_unit(value: f64) -> f64 {
    (value / ROUND_UNIT).round() * ROUND_UNIT
}
