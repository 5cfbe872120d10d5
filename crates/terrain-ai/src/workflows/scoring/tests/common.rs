use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::workflows::scoring::domain::{
    DevelopmentSignal, DriftSnapshot, InfrastructureSignal, MarketDataSource, MarketObservation,
    Region, RegionSignalBatch, RegionTier, ScoringInputs,
};
use crate::workflows::scoring::repository::{DriftHistoryRepository, RepositoryError};
use crate::workflows::scoring::tiers::{BenchmarkSet, TierBenchmark};

pub(super) fn benchmark_for(tier: RegionTier) -> TierBenchmark {
    BenchmarkSet::standard().benchmark(tier).clone()
}

pub(super) fn inputs(
    region: &str,
    development_activity_score: f64,
    infrastructure_score: f64,
    actual_price_per_m2: Option<f64>,
    price_momentum_pct: Option<f64>,
    data_confidence: f64,
) -> ScoringInputs {
    ScoringInputs {
        region: region.to_string(),
        development_activity_score,
        infrastructure_score,
        actual_price_per_m2,
        price_momentum_pct,
        data_confidence,
        market_source: MarketDataSource::LiveScrape,
        listing_count: 12,
    }
}

pub(super) fn batch(
    region: &str,
    activity_score: Option<f64>,
    infrastructure_score: Option<f64>,
    price_per_m2: Option<f64>,
) -> RegionSignalBatch {
    RegionSignalBatch {
        region: Region {
            name: region.to_string(),
            coordinates: None,
        },
        observed_on: day(0),
        development: DevelopmentSignal {
            change_count: 64,
            affected_area_m2: 42_000.0,
            activity_score,
        },
        infrastructure: InfrastructureSignal {
            score: infrastructure_score,
            verified: true,
        },
        market: MarketObservation {
            price_per_m2,
            source: MarketDataSource::LiveScrape,
            confidence: 0.9,
            listing_count: 12,
        },
        price_momentum_pct: Some(3.0),
    }
}

pub(super) fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date") + chrono::Duration::days(offset)
}

pub(super) fn week(index: i64) -> NaiveDate {
    day(index * 7)
}

#[derive(Default, Clone)]
pub(super) struct MemoryDriftStore {
    histories: Arc<Mutex<HashMap<String, Vec<DriftSnapshot>>>>,
}

impl DriftHistoryRepository for MemoryDriftStore {
    fn append(&self, snapshot: DriftSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.histories.lock().expect("lock");
        let history = guard.entry(snapshot.region.clone()).or_default();
        if let Some(last) = history.last() {
            if snapshot.recorded_on < last.recorded_on {
                return Err(RepositoryError::OutOfOrder {
                    region: snapshot.region,
                });
            }
        }
        history.push(snapshot);
        Ok(())
    }

    fn history(&self, region: &str) -> Result<Vec<DriftSnapshot>, RepositoryError> {
        let guard = self.histories.lock().expect("lock");
        Ok(guard.get(region).cloned().unwrap_or_default())
    }

    fn regions(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self.histories.lock().expect("lock");
        Ok(guard.keys().cloned().collect())
    }

    fn prune_before(&self, cutoff: NaiveDate) -> Result<usize, RepositoryError> {
        let mut guard = self.histories.lock().expect("lock");
        let mut removed = 0;
        for history in guard.values_mut() {
            let before = history.len();
            history.retain(|snapshot| snapshot.recorded_on >= cutoff);
            removed += before - history.len();
        }
        Ok(removed)
    }
}
