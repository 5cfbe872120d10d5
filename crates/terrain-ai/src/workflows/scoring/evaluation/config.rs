use serde::{Deserialize, Serialize};

/// Gate configuration turning a composite score into a recommendation. Both
/// the score threshold and the confidence floor must hold for a tier of
/// recommendation to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub buy_score_threshold: f64,
    pub buy_confidence_floor: f64,
    pub watch_score_threshold: f64,
    pub watch_confidence_floor: f64,
    /// Below this confidence the penalty is quadratic; above it, linear.
    pub confidence_knee: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            buy_score_threshold: 40.0,
            buy_confidence_floor: 0.6,
            watch_score_threshold: 25.0,
            watch_confidence_floor: 0.4,
            confidence_knee: 0.85,
        }
    }
}
