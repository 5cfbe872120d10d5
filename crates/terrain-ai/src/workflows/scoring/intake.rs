use super::domain::{MarketDataSource, RegionSignalBatch, ScoringInputs};
use super::tiers::TierBenchmark;

/// Dials for composing a single data-confidence figure out of the individual
/// source confidences.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    pub cached_source_factor: f64,
    pub static_source_factor: f64,
    /// At or below this listing count the market sample is considered sparse.
    pub sparse_listing_count: u32,
    pub sparse_listing_factor: f64,
    /// Below this listing count the sample is thin but workable.
    pub thin_listing_count: u32,
    pub thin_listing_factor: f64,
    pub unverified_infrastructure_factor: f64,
    pub missing_infrastructure_factor: f64,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            cached_source_factor: 0.85,
            static_source_factor: 0.60,
            sparse_listing_count: 3,
            sparse_listing_factor: 0.70,
            thin_listing_count: 8,
            thin_listing_factor: 0.90,
            unverified_infrastructure_factor: 0.80,
            missing_infrastructure_factor: 0.70,
        }
    }
}

/// Conditions under which a raw batch cannot be frozen into scoring inputs.
/// The batch service maps these to an explicit PASS result rather than
/// aborting the run.
#[derive(Debug, thiserror::Error)]
pub enum SignalRejection {
    #[error("region name is empty")]
    EmptyRegionName,
    #[error("no development activity signal for {region}")]
    MissingDevelopmentSignal { region: String },
}

/// Guard producing frozen [`ScoringInputs`] from raw collaborator signals.
///
/// Degraded data never rejects here: it lowers the composed confidence and
/// flows through the confidence multiplier downstream. Only data the scorer
/// cannot work with at all (no activity signal) is refused.
#[derive(Debug, Clone, Default)]
pub struct SignalIntakeGuard {
    policy: IntakePolicy,
}

impl SignalIntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub fn sanitize(
        &self,
        batch: &RegionSignalBatch,
        benchmark: &TierBenchmark,
    ) -> Result<ScoringInputs, SignalRejection> {
        let region = batch.region.name.trim();
        if region.is_empty() {
            return Err(SignalRejection::EmptyRegionName);
        }

        let development_activity_score = match batch.development.activity_score {
            Some(score) if score.is_finite() => score.clamp(0.0, 40.0),
            _ => {
                return Err(SignalRejection::MissingDevelopmentSignal {
                    region: region.to_string(),
                })
            }
        };

        let mut confidence = batch.market.confidence.clamp(0.0, 1.0);
        confidence *= match batch.market.source {
            MarketDataSource::LiveScrape => 1.0,
            MarketDataSource::Cached => self.policy.cached_source_factor,
            MarketDataSource::StaticBenchmark => self.policy.static_source_factor,
        };

        // Zero or negative scraped prices are listing-site noise, not valid
        // observations: demote them to "absent" instead of erroring.
        let mut price = batch
            .market
            .price_per_m2
            .filter(|value| value.is_finite() && *value > 0.0);
        if batch.market.listing_count == 0 {
            price = None;
        }
        if price.is_some() {
            if batch.market.listing_count <= self.policy.sparse_listing_count {
                confidence *= self.policy.sparse_listing_factor;
            } else if batch.market.listing_count < self.policy.thin_listing_count {
                confidence *= self.policy.thin_listing_factor;
            }
        }

        let infrastructure_score = match batch.infrastructure.score {
            Some(score) if score.is_finite() => {
                if !batch.infrastructure.verified {
                    confidence *= self.policy.unverified_infrastructure_factor;
                }
                score.clamp(0.0, 100.0)
            }
            _ => {
                // Documented default: score against the tier's own baseline so
                // the infrastructure premium stays neutral.
                confidence *= self.policy.missing_infrastructure_factor;
                benchmark.baseline_infrastructure_score
            }
        };

        Ok(ScoringInputs {
            region: region.to_string(),
            development_activity_score,
            infrastructure_score,
            actual_price_per_m2: price,
            price_momentum_pct: batch.price_momentum_pct.filter(|value| value.is_finite()),
            data_confidence: confidence.clamp(0.0, 1.0),
            market_source: batch.market.source,
            listing_count: batch.market.listing_count,
        })
    }
}
