mod views;

pub use views::{
    DriftAlertEntry, PortfolioReportView, PortfolioSummary, RecalibrationEntry, RegionScoreView,
};

use super::evaluation::{Recommendation, ScoringResult};
use super::service::BatchScoringOutcome;
use super::valuation::ValuationBand;

/// Aggregation of one batch run into the shape report renderers consume.
#[derive(Debug)]
pub struct PortfolioReport<'a> {
    outcome: &'a BatchScoringOutcome,
}

impl<'a> PortfolioReport<'a> {
    pub fn from_outcome(outcome: &'a BatchScoringOutcome) -> Self {
        Self { outcome }
    }

    pub fn summary(&self) -> PortfolioSummary {
        let results = &self.outcome.results;

        let buy_count = count(results, Recommendation::Buy);
        let watch_count = count(results, Recommendation::Watch);
        let pass_count = count(results, Recommendation::Pass);

        let average_confidence = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|result| result.confidence).sum::<f64>() / results.len() as f64
        };

        let top_opportunity = results
            .iter()
            .filter(|result| result.recommendation != Recommendation::Pass)
            .max_by(|a, b| a.final_score.total_cmp(&b.final_score))
            .map(|result| result.region.clone());

        PortfolioSummary {
            regions_scored: results.len(),
            buy_count,
            watch_count,
            pass_count,
            average_confidence,
            top_opportunity,
        }
    }

    pub fn view(&self) -> PortfolioReportView {
        let regions = self.outcome.results.iter().map(region_view).collect();

        let drift_alerts = self
            .outcome
            .alerts
            .iter()
            .map(|notice| DriftAlertEntry {
                region: notice.region.clone(),
                tier: notice.tier,
                tier_label: notice.tier.label(),
                level: notice.level,
                level_label: notice.level.label(),
                drift_pct: notice.drift_pct,
            })
            .collect();

        let recalibration_proposals = self
            .outcome
            .proposals
            .iter()
            .map(|proposal| RecalibrationEntry {
                tier: proposal.tier,
                tier_label: proposal.tier.label(),
                current_benchmark_price_per_m2: proposal.current_benchmark_price_per_m2,
                proposed_benchmark_price_per_m2: proposal.proposed_benchmark_price_per_m2,
                weighted_mean_drift_pct: proposal.weighted_mean_drift_pct,
                streak_weeks: proposal.streak_weeks,
            })
            .collect();

        PortfolioReportView {
            evaluated_on: self.outcome.evaluated_on,
            summary: self.summary(),
            regions,
            drift_alerts,
            recalibration_proposals,
            failures: self.outcome.failures.clone(),
        }
    }
}

fn count(results: &[ScoringResult], recommendation: Recommendation) -> usize {
    results
        .iter()
        .filter(|result| result.recommendation == recommendation)
        .count()
}

fn region_view(result: &ScoringResult) -> RegionScoreView {
    let band = result
        .valuation
        .as_ref()
        .map(|valuation| valuation.band)
        .unwrap_or(ValuationBand::Unknown);

    RegionScoreView {
        region: result.region.clone(),
        tier: result.tier,
        tier_label: result.tier.label(),
        final_score: result.final_score,
        recommendation: result.recommendation,
        recommendation_label: result.recommendation.label(),
        confidence: result.confidence,
        valuation_band: band,
        valuation_band_label: band.label(),
        rvi: result.valuation.as_ref().and_then(|valuation| valuation.rvi),
        expected_price_per_m2: result
            .valuation
            .as_ref()
            .map(|valuation| valuation.expected_price_per_m2),
        reason: result.reason.clone(),
    }
}
