mod config;
mod policy;
mod rules;

pub use config::ScoringConfig;
pub use policy::Recommendation;
pub use rules::{confidence_multiplier, infrastructure_multiplier, market_multiplier};

use serde::{Deserialize, Serialize};

use super::domain::{RegionTier, ScoringInputs};
use super::tiers::TierBenchmark;
use super::valuation::RviResult;
use policy::decide_recommendation;

/// Stateless scorer applying the gate configuration to frozen inputs.
pub struct InvestmentScorer {
    config: ScoringConfig,
}

impl InvestmentScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, inputs: &ScoringInputs, benchmark: &TierBenchmark) -> ScoringResult {
        let (components, final_score, signals) = rules::score_inputs(inputs, benchmark, &self.config);

        let recommendation =
            decide_recommendation(final_score, inputs.data_confidence, &self.config);

        ScoringResult {
            region: inputs.region.clone(),
            tier: benchmark.tier,
            final_score,
            recommendation,
            infrastructure_multiplier: signals.infrastructure_multiplier,
            market_multiplier: signals.market_multiplier,
            confidence: inputs.data_confidence,
            valuation: Some(signals.valuation),
            components,
            reason: None,
        }
    }
}

/// Factors contributing to a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    DevelopmentActivity,
    Infrastructure,
    Market,
    DataConfidence,
}

/// Discrete contribution to a score, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub applied: f64,
    pub notes: String,
}

/// Final output for one region and one run. Immutable once created; report
/// renderers consume it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub region: String,
    pub tier: RegionTier,
    pub final_score: f64,
    pub recommendation: Recommendation,
    pub infrastructure_multiplier: f64,
    pub market_multiplier: f64,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valuation: Option<RviResult>,
    pub components: Vec<ScoreComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ScoringResult {
    /// Fallback for a region whose signals could not be scored at all. The
    /// region still appears in the report: explicit PASS at zero confidence
    /// with the reason recorded, never a silent omission.
    pub fn unscored(
        region: impl Into<String>,
        tier: RegionTier,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            tier,
            final_score: 0.0,
            recommendation: Recommendation::Pass,
            infrastructure_multiplier: 1.0,
            market_multiplier: 1.0,
            confidence: 0.0,
            valuation: None,
            components: Vec::new(),
            reason: Some(reason.into()),
        }
    }
}
