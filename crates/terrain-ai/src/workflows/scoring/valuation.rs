use serde::{Deserialize, Serialize};

use super::tiers::TierBenchmark;

/// Expected prices are floored here so the RVI division is always defined.
const MIN_EXPECTED_PRICE_PER_M2: f64 = 1.0;
const DEV_SCORE_SPAN: f64 = 40.0;

/// Interpretation of an RVI value. `Unknown` is a first-class case: a missing
/// market price must never be silently read as "fair".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuationBand {
    SignificantlyUndervalued,
    Undervalued,
    Fair,
    Overvalued,
    SignificantlyOvervalued,
    Unknown,
}

impl ValuationBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SignificantlyUndervalued => "significantly undervalued",
            Self::Undervalued => "undervalued",
            Self::Fair => "fair",
            Self::Overvalued => "overvalued",
            Self::SignificantlyOvervalued => "significantly overvalued",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_rvi(rvi: f64) -> Self {
        if rvi < 0.75 {
            Self::SignificantlyUndervalued
        } else if rvi < 0.90 {
            Self::Undervalued
        } else if rvi < 1.10 {
            Self::Fair
        } else if rvi < 1.25 {
            Self::Overvalued
        } else {
            Self::SignificantlyOvervalued
        }
    }
}

/// Output of the relative-value model for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RviResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rvi: Option<f64>,
    pub expected_price_per_m2: f64,
    pub band: ValuationBand,
    pub infrastructure_premium: f64,
    pub momentum_premium: f64,
}

/// Compute the Relative Value Index for a region against its tier benchmark.
///
/// The infrastructure premium scales the deviation from the tier baseline by
/// the tier's own tolerance: frontier tiers have naturally noisy
/// infrastructure scores, and without the wider tolerance a frontier region
/// leading its tier would be misread as overvalued.
pub fn relative_value(
    actual_price_per_m2: Option<f64>,
    infrastructure_score: f64,
    development_activity_score: f64,
    benchmark: &TierBenchmark,
) -> RviResult {
    let infra_deviation = (infrastructure_score - benchmark.baseline_infrastructure_score)
        / benchmark.baseline_infrastructure_score;
    let infrastructure_premium =
        (1.0 + infra_deviation * benchmark.infrastructure_tolerance_pct).clamp(0.7, 1.3);

    let momentum_premium =
        (1.0 + (development_activity_score / DEV_SCORE_SPAN) * 0.2).clamp(0.8, 1.2);

    let expected_price_per_m2 = (benchmark.baseline_price_per_m2
        * infrastructure_premium
        * momentum_premium)
        .max(MIN_EXPECTED_PRICE_PER_M2);

    let actual = actual_price_per_m2.filter(|price| price.is_finite() && *price > 0.0);

    match actual {
        Some(actual) => {
            let rvi = actual / expected_price_per_m2;
            RviResult {
                rvi: Some(rvi),
                expected_price_per_m2,
                band: ValuationBand::from_rvi(rvi),
                infrastructure_premium,
                momentum_premium,
            }
        }
        None => RviResult {
            rvi: None,
            expected_price_per_m2,
            band: ValuationBand::Unknown,
            infrastructure_premium,
            momentum_premium,
        },
    }
}
