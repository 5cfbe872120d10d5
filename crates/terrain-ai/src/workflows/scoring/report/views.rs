use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{DriftAlertLevel, RegionTier};
use super::super::evaluation::Recommendation;
use super::super::valuation::ValuationBand;

#[derive(Debug, Clone, Serialize)]
pub struct RegionScoreView {
    pub region: String,
    pub tier: RegionTier,
    pub tier_label: &'static str,
    pub final_score: f64,
    pub recommendation: Recommendation,
    pub recommendation_label: &'static str,
    pub confidence: f64,
    pub valuation_band: ValuationBand,
    pub valuation_band_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rvi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_price_per_m2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DriftAlertEntry {
    pub region: String,
    pub tier: RegionTier,
    pub tier_label: &'static str,
    pub level: DriftAlertLevel,
    pub level_label: &'static str,
    pub drift_pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecalibrationEntry {
    pub tier: RegionTier,
    pub tier_label: &'static str,
    pub current_benchmark_price_per_m2: f64,
    pub proposed_benchmark_price_per_m2: f64,
    pub weighted_mean_drift_pct: f64,
    pub streak_weeks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioSummary {
    pub regions_scored: usize,
    pub buy_count: usize,
    pub watch_count: usize,
    pub pass_count: usize,
    pub average_confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_opportunity: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReportView {
    pub evaluated_on: NaiveDate,
    pub summary: PortfolioSummary,
    pub regions: Vec<RegionScoreView>,
    pub drift_alerts: Vec<DriftAlertEntry>,
    pub recalibration_proposals: Vec<RecalibrationEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}
