use super::common::{benchmark_for, inputs};
use crate::workflows::scoring::domain::RegionTier;
use crate::workflows::scoring::evaluation::{
    confidence_multiplier, infrastructure_multiplier, market_multiplier, InvestmentScorer,
    Recommendation, ScoringConfig, ScoringResult,
};

#[test]
fn infrastructure_multiplier_is_a_bounded_non_decreasing_step() {
    let mut previous = f64::MIN;
    for step in 0..=200 {
        let score = step as f64 * 0.5;
        let multiplier = infrastructure_multiplier(score);
        assert!((0.80..=1.30).contains(&multiplier), "score {score}");
        assert!(multiplier >= previous, "step down at score {score}");
        previous = multiplier;
    }
}

#[test]
fn market_multiplier_stays_in_range_for_any_input() {
    let rvis = [
        None,
        Some(0.1),
        Some(0.69),
        Some(0.70),
        Some(0.89),
        Some(1.0),
        Some(1.29),
        Some(1.30),
        Some(5.0),
    ];
    let momenta = [None, Some(-80.0), Some(-10.0), Some(0.0), Some(12.0), Some(90.0)];

    for rvi in rvis {
        for momentum in momenta {
            let multiplier = market_multiplier(rvi, momentum);
            assert!(
                (0.85..=1.40).contains(&multiplier),
                "rvi {rvi:?} momentum {momentum:?} gave {multiplier}"
            );
        }
    }
}

#[test]
fn momentum_fallback_matches_the_rvi_output_range() {
    // Downstream scoring never branches on which path produced the
    // multiplier, so the fallback must hit the same extremes.
    assert_eq!(market_multiplier(None, Some(30.0)), 1.40);
    assert_eq!(market_multiplier(None, Some(-20.0)), 0.85);
    assert_eq!(market_multiplier(None, None), 1.00);
}

#[test]
fn confidence_penalty_is_quadratic_below_the_knee() {
    let config = ScoringConfig::default();

    // Below the knee the multiplier has to sit under the identity line.
    for confidence in [0.2, 0.5, 0.7, 0.84] {
        let multiplier = confidence_multiplier(confidence, &config);
        assert!(multiplier < confidence, "confidence {confidence}");
    }

    // Continuous at the knee, identity above it.
    let at_knee = confidence_multiplier(config.confidence_knee, &config);
    assert!((at_knee - config.confidence_knee).abs() < 1e-9);
    assert_eq!(confidence_multiplier(0.95, &config), 0.95);
    assert_eq!(confidence_multiplier(1.0, &config), 1.0);
}

#[test]
fn strong_activity_near_the_knee_lands_in_watch() {
    // 35 x 1.30 (infra 92) x 1.00 (fair rvi) x ~0.82 (confidence 0.835)
    // comes out just under the buy threshold.
    let scorer = InvestmentScorer::new(ScoringConfig::default());
    let benchmark = benchmark_for(RegionTier::Growth);
    let inputs = inputs("Sentul", 35.0, 92.0, Some(10_000_000.0), None, 0.835);

    let result = scorer.score(&inputs, &benchmark);

    assert_eq!(result.infrastructure_multiplier, 1.30);
    assert_eq!(result.market_multiplier, 1.00);
    assert!((37.0..37.7).contains(&result.final_score), "{}", result.final_score);
    assert_eq!(result.recommendation, Recommendation::Watch);
}

#[test]
fn undervalued_high_confidence_region_is_a_buy() {
    let scorer = InvestmentScorer::new(ScoringConfig::default());
    let benchmark = benchmark_for(RegionTier::Frontier);
    // Expected price well above the listing: significantly undervalued.
    let inputs = inputs("Sepaku", 35.0, 92.0, Some(1_000_000.0), Some(5.0), 0.9);

    let result = scorer.score(&inputs, &benchmark);

    assert!(result.final_score >= 40.0);
    assert_eq!(result.recommendation, Recommendation::Buy);
    let valuation = result.valuation.expect("valuation attached");
    assert!(valuation.rvi.expect("rvi defined") < 0.70);
}

#[test]
fn high_score_with_low_confidence_never_buys() {
    // Flatten the knee so a sub-0.6 confidence can still reach the score
    // threshold; the confidence gate alone must block the BUY.
    let config = ScoringConfig {
        confidence_knee: 0.3,
        ..ScoringConfig::default()
    };
    let scorer = InvestmentScorer::new(config);
    let benchmark = benchmark_for(RegionTier::Frontier);
    let inputs = inputs("Samboja", 40.0, 95.0, Some(800_000.0), None, 0.55);

    let result = scorer.score(&inputs, &benchmark);

    assert!(result.final_score >= 40.0, "{}", result.final_score);
    assert_eq!(result.recommendation, Recommendation::Watch);
}

#[test]
fn unscored_result_is_an_explicit_pass_with_reason() {
    let result = ScoringResult::unscored("Muara Gembong", RegionTier::Frontier, "no signals");

    assert_eq!(result.recommendation, Recommendation::Pass);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.final_score, 0.0);
    assert_eq!(result.reason.as_deref(), Some("no signals"));
    assert!(result.valuation.is_none());
}

#[test]
fn component_breakdown_covers_every_factor() {
    let scorer = InvestmentScorer::new(ScoringConfig::default());
    let benchmark = benchmark_for(RegionTier::Growth);
    let inputs = inputs("Cikarang", 22.0, 65.0, Some(7_500_000.0), Some(-2.0), 0.8);

    let result = scorer.score(&inputs, &benchmark);

    assert_eq!(result.components.len(), 4);
    let product: f64 = result.components[1..]
        .iter()
        .map(|component| component.applied)
        .product();
    let reconstructed = result.components[0].applied * product;
    assert!((reconstructed - result.final_score).abs() < 1e-9);
}
