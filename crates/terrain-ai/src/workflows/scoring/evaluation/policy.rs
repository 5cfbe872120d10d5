use serde::{Deserialize, Serialize};

use super::config::ScoringConfig;

/// Discrete investment call for a scored region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    Watch,
    Pass,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Buy => "BUY",
            Recommendation::Watch => "WATCH",
            Recommendation::Pass => "PASS",
        }
    }
}

/// Both gates must hold simultaneously: a high score backed by weak data is
/// not a BUY.
pub(crate) fn decide_recommendation(
    final_score: f64,
    data_confidence: f64,
    config: &ScoringConfig,
) -> Recommendation {
    if final_score >= config.buy_score_threshold && data_confidence >= config.buy_confidence_floor {
        return Recommendation::Buy;
    }

    if final_score >= config.watch_score_threshold
        && data_confidence >= config.watch_confidence_floor
    {
        return Recommendation::Watch;
    }

    Recommendation::Pass
}
