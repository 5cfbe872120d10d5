use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Coarse economic-development class a region belongs to. Tier 1 carries the
/// highest benchmark prices and the tightest infrastructure tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionTier {
    Established,
    Growth,
    Emerging,
    Frontier,
}

impl RegionTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Established, Self::Growth, Self::Emerging, Self::Frontier]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Established => "Established",
            Self::Growth => "Growth Corridor",
            Self::Emerging => "Emerging",
            Self::Frontier => "Frontier",
        }
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::Established => 1,
            Self::Growth => 2,
            Self::Emerging => 3,
            Self::Frontier => 4,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self.rank() as usize - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Immutable region identity. The tier is always looked up, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

/// Provenance of a market price observation, ordered by trustworthiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketDataSource {
    LiveScrape,
    Cached,
    StaticBenchmark,
}

impl MarketDataSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::LiveScrape => "live scrape",
            Self::Cached => "cached",
            Self::StaticBenchmark => "static benchmark",
        }
    }
}

/// Listed-price observation handed over by the market-data collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketObservation {
    #[serde(default)]
    pub price_per_m2: Option<f64>,
    pub source: MarketDataSource,
    pub confidence: f64,
    pub listing_count: u32,
}

/// Change-detection output for one region and time window. The 0..40 activity
/// score is derived upstream from the raw change counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentSignal {
    pub change_count: u32,
    pub affected_area_m2: f64,
    #[serde(default)]
    pub activity_score: Option<f64>,
}

/// Infrastructure proximity score supplied by the geodata collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureSignal {
    #[serde(default)]
    pub score: Option<f64>,
    pub verified: bool,
}

/// Raw per-region signals for one weekly run, exactly as collaborators
/// delivered them. The intake guard turns this into [`ScoringInputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSignalBatch {
    pub region: Region,
    pub observed_on: NaiveDate,
    pub development: DevelopmentSignal,
    pub infrastructure: InfrastructureSignal,
    pub market: MarketObservation,
    #[serde(default)]
    pub price_momentum_pct: Option<f64>,
}

/// Sanitized, frozen inputs for one region and one run. Created once by the
/// intake guard and never mutated afterwards, so every downstream value
/// (RVI included) is a pure function of this snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringInputs {
    pub region: String,
    pub development_activity_score: f64,
    pub infrastructure_score: f64,
    #[serde(default)]
    pub actual_price_per_m2: Option<f64>,
    #[serde(default)]
    pub price_momentum_pct: Option<f64>,
    pub data_confidence: f64,
    pub market_source: MarketDataSource,
    pub listing_count: u32,
}

/// Alert severity for benchmark drift, ordered so that escalation compares
/// with `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftAlertLevel {
    None,
    Warning,
    Critical,
}

impl DriftAlertLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// One weekly drift observation, append-only once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSnapshot {
    pub region: String,
    pub tier: RegionTier,
    pub recorded_on: NaiveDate,
    pub benchmark_price_per_m2: f64,
    pub live_price_per_m2: f64,
    pub drift_pct: f64,
    pub data_source: MarketDataSource,
    pub confidence: f64,
    pub alert_level: DriftAlertLevel,
}
