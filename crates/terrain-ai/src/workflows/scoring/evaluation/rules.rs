use super::super::domain::ScoringInputs;
use super::super::tiers::TierBenchmark;
use super::super::valuation::{self, RviResult};
use super::config::ScoringConfig;
use super::{ScoreComponent, ScoreFactor};

pub(crate) struct ScoreSignals {
    pub valuation: RviResult,
    pub infrastructure_multiplier: f64,
    pub market_multiplier: f64,
    pub confidence_multiplier: f64,
}

pub(crate) fn score_inputs(
    inputs: &ScoringInputs,
    benchmark: &TierBenchmark,
    config: &ScoringConfig,
) -> (Vec<ScoreComponent>, f64, ScoreSignals) {
    let mut components = Vec::new();

    let base = inputs.development_activity_score.clamp(0.0, 40.0);
    components.push(ScoreComponent {
        factor: ScoreFactor::DevelopmentActivity,
        applied: base,
        notes: format!("development activity base {:.1} of 40", base),
    });

    let valuation = valuation::relative_value(
        inputs.actual_price_per_m2,
        inputs.infrastructure_score,
        base,
        benchmark,
    );

    let infrastructure = infrastructure_multiplier(inputs.infrastructure_score);
    components.push(ScoreComponent {
        factor: ScoreFactor::Infrastructure,
        applied: infrastructure,
        notes: format!(
            "infrastructure score {:.0} maps to x{:.2}",
            inputs.infrastructure_score, infrastructure
        ),
    });

    let market = market_multiplier(valuation.rvi, inputs.price_momentum_pct);
    let market_notes = match valuation.rvi {
        Some(rvi) => format!(
            "rvi {:.2} ({}) with momentum {} gives x{:.2}",
            rvi,
            valuation.band.label(),
            inputs
                .price_momentum_pct
                .map(|pct| format!("{pct:+.1}%"))
                .unwrap_or_else(|| "n/a".to_string()),
            market
        ),
        None => format!(
            "no usable market price, momentum fallback gives x{:.2}",
            market
        ),
    };
    components.push(ScoreComponent {
        factor: ScoreFactor::Market,
        applied: market,
        notes: market_notes,
    });

    let confidence = confidence_multiplier(inputs.data_confidence, config);
    components.push(ScoreComponent {
        factor: ScoreFactor::DataConfidence,
        applied: confidence,
        notes: format!(
            "data confidence {:.2} dampens to x{:.2}",
            inputs.data_confidence, confidence
        ),
    });

    let final_score = base * infrastructure * market * confidence;

    let signals = ScoreSignals {
        valuation,
        infrastructure_multiplier: infrastructure,
        market_multiplier: market,
        confidence_multiplier: confidence,
    };

    (components, final_score, signals)
}

/// Five-tier step function over the 0..100 infrastructure score. Steps rather
/// than a curve: the underlying scores are coarse estimates, and the discrete
/// boundaries stay explainable in an investment narrative.
pub fn infrastructure_multiplier(score: f64) -> f64 {
    if score >= 90.0 {
        1.30
    } else if score >= 75.0 {
        1.15
    } else if score >= 60.0 {
        1.00
    } else if score >= 40.0 {
        0.90
    } else {
        0.80
    }
}

/// Valuation-led market multiplier. RVI picks the base tier and momentum
/// nudges it by at most ten percent either way. When the RVI is undefined the
/// momentum fallback produces the identical output range, so callers never
/// branch on which path was taken.
pub fn market_multiplier(rvi: Option<f64>, momentum_pct: Option<f64>) -> f64 {
    let rvi = match rvi {
        Some(value) => value,
        None => return momentum_trend_multiplier(momentum_pct),
    };

    let base = if rvi < 0.70 {
        1.40
    } else if rvi < 0.90 {
        1.25
    } else if rvi < 1.10 {
        1.00
    } else if rvi < 1.30 {
        0.90
    } else {
        0.85
    };

    let momentum_factor = 1.0 + (momentum_pct.unwrap_or(0.0) / 100.0) * 0.1;
    (base * momentum_factor).clamp(0.85, 1.40)
}

fn momentum_trend_multiplier(momentum_pct: Option<f64>) -> f64 {
    let momentum = match momentum_pct {
        Some(value) => value,
        None => return 1.00,
    };

    if momentum >= 25.0 {
        1.40
    } else if momentum >= 10.0 {
        1.25
    } else if momentum > -5.0 {
        1.00
    } else if momentum > -15.0 {
        0.90
    } else {
        0.85
    }
}

/// Quadratic below the knee, linear above it. Weak data gets punished faster
/// than strong data gets rewarded.
pub fn confidence_multiplier(data_confidence: f64, config: &ScoringConfig) -> f64 {
    let confidence = data_confidence.clamp(0.0, 1.0);
    let knee = config.confidence_knee.clamp(f64::EPSILON, 1.0);

    if confidence < knee {
        (confidence / knee).powi(2) * knee
    } else {
        confidence
    }
}
