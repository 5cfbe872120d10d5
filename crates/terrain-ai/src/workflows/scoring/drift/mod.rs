mod recalibration;

pub use recalibration::RecalibrationProposal;

use std::sync::Arc;

use chrono::{Duration, NaiveDate};

use super::domain::{DriftAlertLevel, DriftSnapshot, MarketDataSource, RegionTier};
use super::repository::{DriftHistoryRepository, RepositoryError};
use super::tiers::BenchmarkSet;

/// Look-back window for alert classification, in weekly snapshots.
pub const CLASSIFICATION_WINDOW: usize = 8;
/// Snapshots older than this are pruned on write.
pub const RETENTION_DAYS: i64 = 180;

const SINGLE_WEEK_CRITICAL_PCT: f64 = 30.0;
const TWO_WEEK_CRITICAL_PCT: f64 = 20.0;
const TWO_WEEK_WARNING_PCT: f64 = 15.0;
const FOUR_WEEK_WARNING_PCT: f64 = 10.0;

/// Week-over-week divergence between the live price and the tier benchmark,
/// in percent. A degenerate benchmark reads as zero drift rather than a
/// division error.
pub fn drift_pct(live_price_per_m2: f64, benchmark_price_per_m2: f64) -> f64 {
    if !benchmark_price_per_m2.is_finite() || benchmark_price_per_m2 <= 0.0 {
        return 0.0;
    }
    (live_price_per_m2 - benchmark_price_per_m2) / benchmark_price_per_m2 * 100.0
}

/// Classify a drift series (oldest first) over the most recent eight entries.
///
/// Under two weeks of history there is not enough signal to distinguish a
/// stale benchmark from a one-off listing spike, so sparse histories always
/// classify as `None`.
pub fn classify_window(drifts: &[f64]) -> DriftAlertLevel {
    let start = drifts.len().saturating_sub(CLASSIFICATION_WINDOW);
    let window = &drifts[start..];

    if window.len() < 2 {
        return DriftAlertLevel::None;
    }

    let last_two = &window[window.len() - 2..];

    if window.iter().any(|pct| *pct > SINGLE_WEEK_CRITICAL_PCT)
        || last_two.iter().all(|pct| *pct > TWO_WEEK_CRITICAL_PCT)
    {
        return DriftAlertLevel::Critical;
    }

    if window.len() >= 4
        && window[window.len() - 4..]
            .iter()
            .all(|pct| *pct > FOUR_WEEK_WARNING_PCT)
    {
        return DriftAlertLevel::Warning;
    }

    if last_two.iter().all(|pct| *pct > TWO_WEEK_WARNING_PCT) {
        return DriftAlertLevel::Warning;
    }

    DriftAlertLevel::None
}

/// One weekly (region, live price, benchmark) tuple handed over once scoring
/// for the batch has completed.
#[derive(Debug, Clone, PartialEq)]
pub struct DriftObservation {
    pub region: String,
    pub tier: RegionTier,
    pub benchmark_price_per_m2: f64,
    pub live_price_per_m2: f64,
    pub data_source: MarketDataSource,
    pub confidence: f64,
}

/// Longitudinal monitor keeping the static tier benchmarks honest. Appends
/// weekly snapshots, classifies the alert level per region, and surfaces
/// recalibration proposals for tiers that have drifted persistently.
pub struct BenchmarkDriftMonitor<R> {
    repository: Arc<R>,
    retention_days: i64,
}

impl<R> BenchmarkDriftMonitor<R>
where
    R: DriftHistoryRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_retention(repository, RETENTION_DAYS)
    }

    pub fn with_retention(repository: Arc<R>, retention_days: i64) -> Self {
        Self {
            repository,
            retention_days: retention_days.max(1),
        }
    }

    /// Append this week's observation and return the stored snapshot with its
    /// classified alert level.
    pub fn record(
        &self,
        observation: DriftObservation,
        recorded_on: NaiveDate,
    ) -> Result<DriftSnapshot, RepositoryError> {
        let drift = drift_pct(
            observation.live_price_per_m2,
            observation.benchmark_price_per_m2,
        );

        let history = self.repository.history(&observation.region)?;
        let mut drifts: Vec<f64> = history.iter().map(|snapshot| snapshot.drift_pct).collect();
        drifts.push(drift);
        let alert_level = classify_window(&drifts);

        let snapshot = DriftSnapshot {
            region: observation.region,
            tier: observation.tier,
            recorded_on,
            benchmark_price_per_m2: observation.benchmark_price_per_m2,
            live_price_per_m2: observation.live_price_per_m2,
            drift_pct: drift,
            data_source: observation.data_source,
            confidence: observation.confidence.clamp(0.0, 1.0),
            alert_level,
        };

        self.repository.append(snapshot.clone())?;
        self.repository
            .prune_before(recorded_on - Duration::days(self.retention_days))?;

        Ok(snapshot)
    }

    pub fn history(&self, region: &str) -> Result<Vec<DriftSnapshot>, RepositoryError> {
        self.repository.history(region)
    }

    /// Current alert level for a region, recomputed from stored history.
    pub fn alert_level(&self, region: &str) -> Result<DriftAlertLevel, RepositoryError> {
        let history = self.repository.history(region)?;
        let drifts: Vec<f64> = history.iter().map(|snapshot| snapshot.drift_pct).collect();
        Ok(classify_window(&drifts))
    }

    /// Recalibration proposals across all tiers. Proposals are returned for
    /// explicit approval; the monitor never rewrites a benchmark itself.
    pub fn recalibration_proposals(
        &self,
        benchmarks: &BenchmarkSet,
        today: NaiveDate,
    ) -> Result<Vec<RecalibrationProposal>, RepositoryError> {
        let mut snapshots = Vec::new();
        for region in self.repository.regions()? {
            snapshots.extend(self.repository.history(&region)?);
        }
        Ok(recalibration::tier_proposals(&snapshots, benchmarks, today))
    }
}
