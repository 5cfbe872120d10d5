use crate::infra::{engine_settings, InMemoryAlertPublisher, InMemoryDriftHistoryRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use terrain_ai::config::AppConfig;
use terrain_ai::error::AppError;
use terrain_ai::workflows::scoring::{
    BatchScoringOutcome, DevelopmentSignal, InfrastructureSignal, MarketDataSource,
    MarketObservation, PortfolioReport, Region, RegionScoringService, RegionSignalBatch,
};
use terrain_ai::workflows::signals::SignalBatchImporter;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the run (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) evaluated_on: Option<NaiveDate>,
    /// Optional collaborator signal CSV instead of the synthetic portfolio
    #[arg(long)]
    pub(crate) signals_csv: Option<PathBuf>,
    /// Print the per-factor component breakdown for every region
    #[arg(long)]
    pub(crate) list_components: bool,
    /// Skip seeding the eight weeks of drift history before the run
    #[arg(long)]
    pub(crate) skip_drift_seed: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoringReportArgs {
    /// Collaborator signal CSV, one row per region
    #[arg(long)]
    pub(crate) signals_csv: PathBuf,
    /// Evaluation date for the run (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) evaluated_on: Option<NaiveDate>,
    /// Print the per-factor component breakdown for every region
    #[arg(long)]
    pub(crate) list_components: bool,
}

pub(crate) fn run_scoring_report(args: ScoringReportArgs) -> Result<(), AppError> {
    let ScoringReportArgs {
        signals_csv,
        evaluated_on,
        list_components,
    } = args;

    let config = AppConfig::load()?;
    let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().date_naive());
    let batches = SignalBatchImporter::from_path(signals_csv)?;

    let repository = Arc::new(InMemoryDriftHistoryRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service =
        RegionScoringService::new(repository, alerts, engine_settings(&config.acquisition));

    let outcome = service.score_batch(&batches, evaluated_on);
    render_portfolio_report(&outcome, list_components);
    render_plot_sizing(&service, &config, &batches, &outcome);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        evaluated_on,
        signals_csv,
        list_components,
        skip_drift_seed,
    } = args;

    let config = AppConfig::load()?;
    let evaluated_on = evaluated_on.unwrap_or_else(|| Local::now().date_naive());

    let (batches, imported) = match signals_csv {
        Some(path) => (SignalBatchImporter::from_path(path)?, true),
        None => (synthetic_portfolio(evaluated_on), false),
    };

    println!("Land acquisition scoring demo");
    println!("Evaluation date: {evaluated_on}");
    if imported {
        println!("Data source: collaborator signal CSV");
    } else {
        println!("Data source: synthetic portfolio (no signal export provided)");
    }

    let repository = Arc::new(InMemoryDriftHistoryRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service =
        RegionScoringService::new(repository, alerts.clone(), engine_settings(&config.acquisition));

    if !skip_drift_seed && !imported {
        // Eight prior weekly runs for one overheated frontier market, so the
        // demo shows escalation and a recalibration proposal.
        for week in 0..8 {
            let recorded_on = evaluated_on - chrono::Duration::days(7 * (8 - week));
            let seed = vec![frontier_market("Penajam", 3_000_000.0, recorded_on)];
            service.score_batch(&seed, recorded_on);
        }
        println!("Seeded 8 weeks of drift history for Penajam");
    }

    let outcome = service.score_batch(&batches, evaluated_on);
    render_portfolio_report(&outcome, list_components);
    render_plot_sizing(&service, &config, &batches, &outcome);

    let events = alerts.events();
    if events.is_empty() {
        println!("\nPublished drift alerts: none");
    } else {
        println!("\nPublished drift alerts");
        for notice in events {
            println!(
                "- [{}] {} ({}) drift {:+.1}%",
                notice.level.label(),
                notice.region,
                notice.tier.label(),
                notice.drift_pct
            );
        }
    }

    Ok(())
}

fn render_portfolio_report(outcome: &BatchScoringOutcome, list_components: bool) {
    let report = PortfolioReport::from_outcome(outcome);
    let view = report.view();

    println!("\nPortfolio summary ({} regions)", view.summary.regions_scored);
    println!(
        "- BUY {} | WATCH {} | PASS {} | average confidence {:.2}",
        view.summary.buy_count,
        view.summary.watch_count,
        view.summary.pass_count,
        view.summary.average_confidence
    );
    if let Some(top) = &view.summary.top_opportunity {
        println!("- Top opportunity: {top}");
    }

    println!("\nRegions");
    for region in &view.regions {
        let valuation_note = match region.rvi {
            Some(rvi) => format!("rvi {:.2} ({})", rvi, region.valuation_band_label),
            None => format!("valuation {}", region.valuation_band_label),
        };
        let reason_note = match &region.reason {
            Some(reason) => format!(" [{reason}]"),
            None => String::new(),
        };
        println!(
            "- {} ({}): score {:.1} -> {} | {} | confidence {:.2}{}",
            region.region,
            region.tier_label,
            region.final_score,
            region.recommendation_label,
            valuation_note,
            region.confidence,
            reason_note
        );
    }

    if view.drift_alerts.is_empty() {
        println!("\nDrift alerts: none");
    } else {
        println!("\nDrift alerts");
        for alert in &view.drift_alerts {
            println!(
                "- [{}] {} ({}) drift {:+.1}%",
                alert.level_label, alert.region, alert.tier_label, alert.drift_pct
            );
        }
    }

    if view.recalibration_proposals.is_empty() {
        println!("\nRecalibration proposals: none");
    } else {
        println!("\nRecalibration proposals (approval required)");
        for proposal in &view.recalibration_proposals {
            println!(
                "- {}: benchmark {:.0} -> {:.0} after {} weeks at {:.1}% mean drift",
                proposal.tier_label,
                proposal.current_benchmark_price_per_m2,
                proposal.proposed_benchmark_price_per_m2,
                proposal.streak_weeks,
                proposal.weighted_mean_drift_pct
            );
        }
    }

    if !view.failures.is_empty() {
        println!("\nBookkeeping failures");
        for failure in &view.failures {
            println!("- {failure}");
        }
    }

    if list_components {
        println!("\nComponent breakdown");
        for result in &outcome.results {
            println!("- {}", result.region);
            for component in &result.components {
                println!(
                    "    {:?}: {:.3} ({})",
                    component.factor, component.applied, component.notes
                );
            }
        }
    }
}

fn render_plot_sizing(
    service: &RegionScoringService<InMemoryDriftHistoryRepository, InMemoryAlertPublisher>,
    config: &AppConfig,
    batches: &[RegionSignalBatch],
    outcome: &BatchScoringOutcome,
) {
    let report = PortfolioReport::from_outcome(outcome);
    let top = match report.summary().top_opportunity {
        Some(region) => region,
        None => return,
    };

    let land_price = batches
        .iter()
        .find(|batch| batch.region.name == top)
        .and_then(|batch| batch.market.price_per_m2);
    let land_price = match land_price {
        Some(price) => price,
        None => return,
    };

    let sizing = service.size_plot(
        config.acquisition.target_budget,
        land_price,
        config.acquisition.development_cost_per_m2,
    );
    println!(
        "\nBudget sizing for {}: {:.0} m2 at {:.0}/m2 all-in (outlay {:.0}{})",
        top,
        sizing.recommended_m2,
        sizing.total_cost_per_m2,
        sizing.estimated_outlay,
        if sizing.clamped { ", clamped" } else { "" }
    );
}

fn frontier_market(region: &str, price_per_m2: f64, observed_on: NaiveDate) -> RegionSignalBatch {
    RegionSignalBatch {
        region: Region {
            name: region.to_string(),
            coordinates: None,
        },
        observed_on,
        development: DevelopmentSignal {
            change_count: 35,
            affected_area_m2: 21_000.0,
            activity_score: Some(20.0),
        },
        infrastructure: InfrastructureSignal {
            score: Some(55.0),
            verified: true,
        },
        market: MarketObservation {
            price_per_m2: Some(price_per_m2),
            source: MarketDataSource::LiveScrape,
            confidence: 0.85,
            listing_count: 9,
        },
        price_momentum_pct: Some(2.0),
    }
}

fn synthetic_portfolio(observed_on: NaiveDate) -> Vec<RegionSignalBatch> {
    let batch = |name: &str,
                 activity: Option<f64>,
                 infra: Option<f64>,
                 price: Option<f64>,
                 source: MarketDataSource,
                 confidence: f64,
                 listings: u32,
                 momentum: Option<f64>| {
        RegionSignalBatch {
            region: Region {
                name: name.to_string(),
                coordinates: None,
            },
            observed_on,
            development: DevelopmentSignal {
                change_count: 50,
                affected_area_m2: 30_000.0,
                activity_score: activity,
            },
            infrastructure: InfrastructureSignal {
                score: infra,
                verified: true,
            },
            market: MarketObservation {
                price_per_m2: price,
                source,
                confidence,
                listing_count: listings,
            },
            price_momentum_pct: momentum,
        }
    };

    vec![
        batch(
            "BSD City",
            Some(18.0),
            Some(88.0),
            Some(15_500_000.0),
            MarketDataSource::LiveScrape,
            0.92,
            24,
            Some(3.2),
        ),
        batch(
            "Sentul",
            Some(28.0),
            Some(72.0),
            Some(7_200_000.0),
            MarketDataSource::LiveScrape,
            0.90,
            14,
            Some(6.5),
        ),
        batch(
            "Parung Panjang",
            Some(31.0),
            Some(50.0),
            Some(3_100_000.0),
            MarketDataSource::Cached,
            0.80,
            7,
            Some(9.0),
        ),
        batch(
            "Sepaku",
            Some(36.0),
            Some(62.0),
            Some(1_250_000.0),
            MarketDataSource::LiveScrape,
            0.88,
            11,
            Some(12.0),
        ),
        frontier_market("Penajam", 3_050_000.0, observed_on),
        batch(
            "Muara Gembong",
            Some(24.0),
            None,
            Some(1_400_000.0),
            MarketDataSource::StaticBenchmark,
            0.60,
            3,
            None,
        ),
        // Change-detection outage: no activity score at all.
        batch(
            "Jonggol",
            None,
            Some(48.0),
            Some(4_100_000.0),
            MarketDataSource::Cached,
            0.70,
            6,
            Some(1.0),
        ),
    ]
}
