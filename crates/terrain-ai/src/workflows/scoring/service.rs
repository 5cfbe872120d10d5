use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::domain::{DriftAlertLevel, DriftSnapshot, RegionSignalBatch};
use super::drift::{BenchmarkDriftMonitor, DriftObservation, RecalibrationProposal};
use super::evaluation::{InvestmentScorer, ScoringConfig, ScoringResult};
use super::intake::{IntakePolicy, SignalIntakeGuard};
use super::repository::{AlertPublisher, DriftAlertNotice, DriftHistoryRepository, RepositoryError};
use super::sizing::{BudgetSizer, PlotSizing};
use super::tiers::{BenchmarkSet, TierClassifier};

/// Everything the scoring pipeline needs beyond its storage and alert
/// handles. Built once at startup and injected, so components never reach for
/// shared mutable tables.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub scoring: ScoringConfig,
    pub intake: IntakePolicy,
    pub benchmarks: BenchmarkSet,
    pub classifier: TierClassifier,
    pub sizer: BudgetSizer,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            intake: IntakePolicy::default(),
            benchmarks: BenchmarkSet::standard(),
            classifier: TierClassifier::standard(),
            sizer: BudgetSizer::new(500.0, 50_000.0),
        }
    }
}

/// Aggregated outcome of one weekly batch run.
#[derive(Debug, Clone)]
pub struct BatchScoringOutcome {
    pub evaluated_on: NaiveDate,
    pub results: Vec<ScoringResult>,
    pub alerts: Vec<DriftAlertNotice>,
    pub proposals: Vec<RecalibrationProposal>,
    /// Non-fatal bookkeeping failures (drift writes, alert dispatch). Scoring
    /// results above are complete even when entries appear here.
    pub failures: Vec<String>,
}

/// Service composing the intake guard, classifier, scorer, sizer, and drift
/// monitor into the per-batch pipeline.
pub struct RegionScoringService<R, A> {
    guard: SignalIntakeGuard,
    scorer: InvestmentScorer,
    benchmarks: BenchmarkSet,
    classifier: TierClassifier,
    sizer: BudgetSizer,
    monitor: BenchmarkDriftMonitor<R>,
    alerts: Arc<A>,
}

impl<R, A> RegionScoringService<R, A>
where
    R: DriftHistoryRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>, settings: EngineSettings) -> Self {
        Self {
            guard: SignalIntakeGuard::with_policy(settings.intake),
            scorer: InvestmentScorer::new(settings.scoring),
            benchmarks: settings.benchmarks,
            classifier: settings.classifier,
            sizer: settings.sizer,
            monitor: BenchmarkDriftMonitor::new(repository),
            alerts,
        }
    }

    pub fn benchmarks(&self) -> &BenchmarkSet {
        &self.benchmarks
    }

    pub fn classifier(&self) -> &TierClassifier {
        &self.classifier
    }

    /// Score one region from its frozen signal batch. Pure with respect to
    /// the drift store: no history is read or written here.
    pub fn score_region(&self, batch: &RegionSignalBatch) -> ScoringResult {
        let tier = self.classifier.classify(&batch.region.name);
        let benchmark = self.benchmarks.benchmark(tier);

        match self.guard.sanitize(batch, benchmark) {
            Ok(inputs) => self.scorer.score(&inputs, benchmark),
            Err(rejection) => {
                warn!(region = %batch.region.name, %rejection, "region could not be scored");
                ScoringResult::unscored(batch.region.name.trim(), tier, rejection.to_string())
            }
        }
    }

    /// Score a weekly batch. Regions are independent: one region's missing
    /// data or a failed drift write never fails the others, and every
    /// submitted region appears in the results.
    pub fn score_batch(
        &self,
        batches: &[RegionSignalBatch],
        evaluated_on: NaiveDate,
    ) -> BatchScoringOutcome {
        let mut results = Vec::with_capacity(batches.len());
        let mut alerts = Vec::new();
        let mut failures = Vec::new();

        for batch in batches {
            let result = self.score_region(batch);

            let live_price = batch
                .market
                .price_per_m2
                .filter(|price| price.is_finite() && *price > 0.0);
            if let Some(live_price) = live_price {
                let benchmark = self.benchmarks.benchmark(result.tier);
                let observation = DriftObservation {
                    region: result.region.clone(),
                    tier: result.tier,
                    benchmark_price_per_m2: benchmark.baseline_price_per_m2,
                    live_price_per_m2: live_price,
                    data_source: batch.market.source,
                    confidence: result.confidence,
                };

                match self.monitor.record(observation, evaluated_on) {
                    Ok(snapshot) if snapshot.alert_level > DriftAlertLevel::None => {
                        let notice = drift_notice(&snapshot);
                        if let Err(err) = self.alerts.publish(notice.clone()) {
                            warn!(region = %snapshot.region, %err, "drift alert dispatch failed");
                            failures
                                .push(format!("{}: alert dispatch failed ({err})", snapshot.region));
                        }
                        alerts.push(notice);
                    }
                    Ok(_) => {}
                    Err(err) => {
                        warn!(region = %result.region, %err, "drift history write failed");
                        failures
                            .push(format!("{}: drift history write failed ({err})", result.region));
                    }
                }
            }

            results.push(result);
        }

        let proposals = match self
            .monitor
            .recalibration_proposals(&self.benchmarks, evaluated_on)
        {
            Ok(proposals) => proposals,
            Err(err) => {
                warn!(%err, "recalibration scan failed");
                failures.push(format!("recalibration scan failed ({err})"));
                Vec::new()
            }
        };

        BatchScoringOutcome {
            evaluated_on,
            results,
            alerts,
            proposals,
            failures,
        }
    }

    pub fn drift_history(&self, region: &str) -> Result<Vec<DriftSnapshot>, RepositoryError> {
        self.monitor.history(region)
    }

    pub fn drift_alert_level(&self, region: &str) -> Result<DriftAlertLevel, RepositoryError> {
        self.monitor.alert_level(region)
    }

    pub fn recalibration_proposals(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<RecalibrationProposal>, RepositoryError> {
        self.monitor.recalibration_proposals(&self.benchmarks, today)
    }

    pub fn size_plot(
        &self,
        target_budget: f64,
        land_price_per_m2: f64,
        development_cost_per_m2: f64,
    ) -> PlotSizing {
        self.sizer
            .size(target_budget, land_price_per_m2, development_cost_per_m2)
    }
}

fn drift_notice(snapshot: &DriftSnapshot) -> DriftAlertNotice {
    let mut details = BTreeMap::new();
    details.insert(
        "benchmark_price_per_m2".to_string(),
        format!("{:.0}", snapshot.benchmark_price_per_m2),
    );
    details.insert(
        "live_price_per_m2".to_string(),
        format!("{:.0}", snapshot.live_price_per_m2),
    );
    details.insert(
        "data_source".to_string(),
        snapshot.data_source.label().to_string(),
    );

    DriftAlertNotice {
        region: snapshot.region.clone(),
        tier: snapshot.tier,
        level: snapshot.alert_level,
        drift_pct: snapshot.drift_pct,
        details,
    }
}
