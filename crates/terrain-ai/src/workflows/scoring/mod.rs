//! Region scoring pipeline: tier classification, relative valuation,
//! multiplier rules, budget sizing, and benchmark-drift monitoring.
//!
//! Scoring is embarrassingly parallel across regions; nothing here shares
//! mutable state between regions except the drift history behind
//! [`repository::DriftHistoryRepository`], which is keyed per region.

pub mod domain;
pub mod drift;
pub(crate) mod evaluation;
pub(crate) mod intake;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod sizing;
pub mod tiers;
pub mod valuation;

#[cfg(test)]
mod tests;

pub use domain::{
    Coordinates, DevelopmentSignal, DriftAlertLevel, DriftSnapshot, InfrastructureSignal,
    MarketDataSource, MarketObservation, Region, RegionSignalBatch, RegionTier, ScoringInputs,
};
pub use drift::{
    classify_window, drift_pct, BenchmarkDriftMonitor, DriftObservation, RecalibrationProposal,
};
pub use evaluation::{
    confidence_multiplier, infrastructure_multiplier, market_multiplier, InvestmentScorer,
    Recommendation, ScoreComponent, ScoreFactor, ScoringConfig, ScoringResult,
};
pub use intake::{IntakePolicy, SignalIntakeGuard, SignalRejection};
pub use report::{PortfolioReport, PortfolioReportView, PortfolioSummary};
pub use repository::{
    AlertError, AlertPublisher, DriftAlertNotice, DriftHistoryRepository, RepositoryError,
};
pub use router::scoring_router;
pub use service::{BatchScoringOutcome, EngineSettings, RegionScoringService};
pub use sizing::{BudgetSizer, PlotSizing};
pub use tiers::{BenchmarkSet, BenchmarkSetError, TierBenchmark, TierClassifier};
pub use valuation::{relative_value, RviResult, ValuationBand};
