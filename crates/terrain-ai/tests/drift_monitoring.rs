//! Integration specifications for the longitudinal drift monitor as driven
//! through the batch scoring service: escalation over consecutive weekly
//! runs, alert publication, and recalibration proposals.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use terrain_ai::workflows::scoring::{
        AlertError, AlertPublisher, DevelopmentSignal, DriftAlertNotice, DriftHistoryRepository,
        DriftSnapshot, EngineSettings, InfrastructureSignal, MarketDataSource, MarketObservation,
        Region, RegionScoringService, RegionSignalBatch, RepositoryError,
    };

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

    #[derive(Default, Clone)]
    pub(super) struct MemoryAlerts {
        events: Arc<Mutex<Vec<DriftAlertNotice>>>,
    }

    impl MemoryAlerts {
        pub(super) fn events(&self) -> Vec<DriftAlertNotice> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl AlertPublisher for MemoryAlerts {
        fn publish(&self, notice: DriftAlertNotice) -> Result<(), AlertError> {
            self.events.lock().expect("lock").push(notice);
            Ok(())
        }
    }

    pub(super) fn build_service() -> (
        RegionScoringService<MemoryDriftStore, MemoryAlerts>,
        Arc<MemoryAlerts>,
    ) {
        let repository = Arc::new(MemoryDriftStore::default());
        let alerts = Arc::new(MemoryAlerts::default());
        let service =
            RegionScoringService::new(repository, alerts.clone(), EngineSettings::default());
        (service, alerts)
    }

    pub(super) fn weekly_date(index: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date") + chrono::Duration::days(index * 7)
    }

    pub(super) fn frontier_batch(region: &str, price_per_m2: f64, week: i64) -> RegionSignalBatch {
        RegionSignalBatch {
            region: Region {
                name: region.to_string(),
                coordinates: None,
            },
            observed_on: weekly_date(week),
            development: DevelopmentSignal {
                change_count: 40,
                affected_area_m2: 25_000.0,
                activity_score: Some(24.0),
            },
            infrastructure: InfrastructureSignal {
                score: Some(44.0),
                verified: true,
            },
            market: MarketObservation {
                price_per_m2: Some(price_per_m2),
                source: MarketDataSource::LiveScrape,
                confidence: 0.85,
                listing_count: 10,
            },
            price_momentum_pct: Some(2.0),
        }
    }
}

mod escalation {
    use super::common::*;
    use terrain_ai::workflows::scoring::DriftAlertLevel;

    #[test]
    fn steady_prices_never_alert() {
        let (service, alerts) = build_service();

        for week in 0..6 {
            let batches = vec![frontier_batch("Sepaku", 1_520_000.0, week)];
            let outcome = service.score_batch(&batches, weekly_date(week));
            assert!(outcome.alerts.is_empty(), "week {week}");
        }

        assert!(alerts.events().is_empty());
        assert_eq!(
            service.drift_alert_level("Sepaku").expect("level"),
            DriftAlertLevel::None
        );
    }

    #[test]
    fn two_hot_weeks_escalate_to_critical() {
        let (service, alerts) = build_service();

        // Benchmark is 1,500,000: 22% then 24% above it.
        for (week, price) in [(0, 1_830_000.0), (1, 1_860_000.0)] {
            let batches = vec![frontier_batch("Sepaku", price, week)];
            service.score_batch(&batches, weekly_date(week));
        }

        assert_eq!(
            service.drift_alert_level("Sepaku").expect("level"),
            DriftAlertLevel::Critical
        );

        let events = alerts.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, DriftAlertLevel::Critical);
        assert_eq!(events[0].region, "Sepaku");
    }

    #[test]
    fn sustained_moderate_drift_raises_a_warning_first() {
        let (service, alerts) = build_service();

        // Four weeks between 10% and 15% over benchmark.
        for (week, price) in [
            (0, 1_670_000.0),
            (1, 1_680_000.0),
            (2, 1_690_000.0),
            (3, 1_700_000.0),
        ] {
            let batches = vec![frontier_batch("Samboja", price, week)];
            service.score_batch(&batches, weekly_date(week));
        }

        assert_eq!(
            service.drift_alert_level("Samboja").expect("level"),
            DriftAlertLevel::Warning
        );
        let events = alerts.events();
        assert!(!events.is_empty());
        assert!(events
            .iter()
            .all(|notice| notice.level == DriftAlertLevel::Warning));
    }

    #[test]
    fn alert_level_comes_back_down_as_prices_settle() {
        let (service, _) = build_service();

        for (week, price) in [(0, 1_830_000.0), (1, 1_860_000.0)] {
            service.score_batch(&[frontier_batch("Penajam", price, week)], weekly_date(week));
        }
        assert_eq!(
            service.drift_alert_level("Penajam").expect("level"),
            DriftAlertLevel::Critical
        );

        // Seven quiet weeks push the spike out of the look-back window.
        for week in 2..9 {
            service.score_batch(
                &[frontier_batch("Penajam", 1_510_000.0, week)],
                weekly_date(week),
            );
        }

        assert_eq!(
            service.drift_alert_level("Penajam").expect("level"),
            DriftAlertLevel::None
        );
    }
}

mod recalibration {
    use super::common::*;
    use terrain_ai::workflows::scoring::RegionTier;

    #[test]
    fn nine_hot_weeks_surface_a_tier_proposal() {
        let (service, _) = build_service();

        for week in 0..9 {
            let batches = vec![
                frontier_batch("Sepaku", 3_000_000.0, week),
                frontier_batch("Penajam", 3_100_000.0, week),
            ];
            let outcome = service.score_batch(&batches, weekly_date(week));

            if week < 7 {
                assert!(outcome.proposals.is_empty(), "week {week}");
            }
        }

        let proposals = service
            .recalibration_proposals(weekly_date(8))
            .expect("proposals");
        assert_eq!(proposals.len(), 1);

        let proposal = &proposals[0];
        assert_eq!(proposal.tier, RegionTier::Frontier);
        assert_eq!(proposal.current_benchmark_price_per_m2, 1_500_000.0);
        assert_eq!(proposal.proposed_benchmark_price_per_m2, 3_050_000.0);
        assert!(proposal.streak_weeks >= 8);
    }

    #[test]
    fn proposals_never_touch_the_configured_benchmarks() {
        let (service, _) = build_service();

        for week in 0..9 {
            service.score_batch(
                &[frontier_batch("Sepaku", 3_000_000.0, week)],
                weekly_date(week),
            );
        }

        let benchmark = service.benchmarks().benchmark(RegionTier::Frontier);
        assert_eq!(benchmark.baseline_price_per_m2, 1_500_000.0);
    }
}
