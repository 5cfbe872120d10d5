use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::RegionTier;

/// Per-tier constants the valuation model is anchored to. Loaded once at
/// startup and read-only for the lifetime of a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBenchmark {
    pub tier: RegionTier,
    pub baseline_price_per_m2: f64,
    pub baseline_infrastructure_score: f64,
    pub expected_annual_growth_pct: f64,
    pub infrastructure_tolerance_pct: f64,
}

/// Validation errors raised when assembling a benchmark set.
#[derive(Debug, thiserror::Error)]
pub enum BenchmarkSetError {
    #[error("missing benchmark for {0:?}")]
    MissingTier(RegionTier),
    #[error("duplicate benchmark for {0:?}")]
    DuplicateTier(RegionTier),
    #[error("benchmark for {0:?} must have positive price and infrastructure baselines")]
    NonPositiveBaseline(RegionTier),
    #[error("infrastructure tolerance must increase strictly from tier 1 to tier 4")]
    ToleranceOrdering,
}

/// Exactly one benchmark per tier, tolerance strictly widening toward the
/// frontier tiers.
#[derive(Debug, Clone)]
pub struct BenchmarkSet {
    benchmarks: [TierBenchmark; 4],
}

impl BenchmarkSet {
    pub fn new(benchmarks: Vec<TierBenchmark>) -> Result<Self, BenchmarkSetError> {
        let mut slots: [Option<TierBenchmark>; 4] = [None, None, None, None];

        for benchmark in benchmarks {
            if benchmark.baseline_price_per_m2 <= 0.0
                || benchmark.baseline_infrastructure_score <= 0.0
            {
                return Err(BenchmarkSetError::NonPositiveBaseline(benchmark.tier));
            }

            let slot = &mut slots[benchmark.tier.index()];
            if slot.is_some() {
                return Err(BenchmarkSetError::DuplicateTier(benchmark.tier));
            }
            *slot = Some(benchmark);
        }

        let [established, growth, emerging, frontier] = slots;
        let benchmarks = [
            established.ok_or(BenchmarkSetError::MissingTier(RegionTier::Established))?,
            growth.ok_or(BenchmarkSetError::MissingTier(RegionTier::Growth))?,
            emerging.ok_or(BenchmarkSetError::MissingTier(RegionTier::Emerging))?,
            frontier.ok_or(BenchmarkSetError::MissingTier(RegionTier::Frontier))?,
        ];

        for pair in benchmarks.windows(2) {
            if pair[1].infrastructure_tolerance_pct <= pair[0].infrastructure_tolerance_pct {
                return Err(BenchmarkSetError::ToleranceOrdering);
            }
        }

        Ok(Self { benchmarks })
    }

    /// The benchmark set shipped with the service, calibrated for IDR-scale
    /// land markets around the Jakarta corridor and the Kalimantan frontier.
    pub fn standard() -> Self {
        Self {
            benchmarks: [
                TierBenchmark {
                    tier: RegionTier::Established,
                    baseline_price_per_m2: 15_000_000.0,
                    baseline_infrastructure_score: 85.0,
                    expected_annual_growth_pct: 4.5,
                    infrastructure_tolerance_pct: 0.15,
                },
                TierBenchmark {
                    tier: RegionTier::Growth,
                    baseline_price_per_m2: 8_000_000.0,
                    baseline_infrastructure_score: 70.0,
                    expected_annual_growth_pct: 7.0,
                    infrastructure_tolerance_pct: 0.20,
                },
                TierBenchmark {
                    tier: RegionTier::Emerging,
                    baseline_price_per_m2: 4_000_000.0,
                    baseline_infrastructure_score: 55.0,
                    expected_annual_growth_pct: 10.0,
                    infrastructure_tolerance_pct: 0.25,
                },
                TierBenchmark {
                    tier: RegionTier::Frontier,
                    baseline_price_per_m2: 1_500_000.0,
                    baseline_infrastructure_score: 40.0,
                    expected_annual_growth_pct: 14.0,
                    infrastructure_tolerance_pct: 0.30,
                },
            ],
        }
    }

    pub fn benchmark(&self, tier: RegionTier) -> &TierBenchmark {
        &self.benchmarks[tier.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierBenchmark> {
        self.benchmarks.iter()
    }
}

/// Region-name lookup over a static assignment table. Unknown regions fall
/// back to the frontier tier so the scorer always has a benchmark to work
/// against.
#[derive(Debug, Clone)]
pub struct TierClassifier {
    assignments: BTreeMap<String, RegionTier>,
}

impl TierClassifier {
    pub fn new<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (String, RegionTier)>,
    {
        let assignments = assignments
            .into_iter()
            .map(|(name, tier)| (normalize(&name), tier))
            .collect();
        Self { assignments }
    }

    /// Assignment table shipped with the service.
    pub fn standard() -> Self {
        let entries = [
            ("Menteng", RegionTier::Established),
            ("Kebayoran Baru", RegionTier::Established),
            ("Pondok Indah", RegionTier::Established),
            ("BSD City", RegionTier::Established),
            ("Serpong", RegionTier::Growth),
            ("Sentul", RegionTier::Growth),
            ("Cikarang", RegionTier::Growth),
            ("Depok", RegionTier::Growth),
            ("Parung Panjang", RegionTier::Emerging),
            ("Jonggol", RegionTier::Emerging),
            ("Maja", RegionTier::Emerging),
            ("Tanjung Lesung", RegionTier::Emerging),
            ("Sepaku", RegionTier::Frontier),
            ("Samboja", RegionTier::Frontier),
            ("Penajam", RegionTier::Frontier),
            ("Muara Gembong", RegionTier::Frontier),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(name, tier)| (name.to_string(), tier)),
        )
    }

    pub fn classify(&self, region_name: &str) -> RegionTier {
        self.assignments
            .get(&normalize(region_name))
            .copied()
            .unwrap_or(RegionTier::Frontier)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_passes_validation() {
        let standard = BenchmarkSet::standard();
        let revalidated = BenchmarkSet::new(standard.iter().cloned().collect());
        assert!(revalidated.is_ok());
    }

    #[test]
    fn duplicate_tier_is_rejected() {
        let mut benchmarks: Vec<TierBenchmark> = BenchmarkSet::standard().iter().cloned().collect();
        benchmarks[1].tier = RegionTier::Established;
        match BenchmarkSet::new(benchmarks) {
            Err(BenchmarkSetError::DuplicateTier(RegionTier::Established)) => {}
            other => panic!("expected duplicate tier error, got {other:?}"),
        }
    }

    #[test]
    fn tolerance_must_widen_toward_frontier() {
        let mut benchmarks: Vec<TierBenchmark> = BenchmarkSet::standard().iter().cloned().collect();
        benchmarks[3].infrastructure_tolerance_pct = 0.10;
        match BenchmarkSet::new(benchmarks) {
            Err(BenchmarkSetError::ToleranceOrdering) => {}
            other => panic!("expected tolerance ordering error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_region_defaults_to_frontier() {
        let classifier = TierClassifier::standard();
        assert_eq!(classifier.classify("Atlantis Bay"), RegionTier::Frontier);
        assert_eq!(classifier.classify("  sentul  "), RegionTier::Growth);
        assert_eq!(classifier.classify("MENTENG"), RegionTier::Established);
    }
}
