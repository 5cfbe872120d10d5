use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use super::SignalImportError;
use crate::workflows::scoring::domain::{
    Coordinates, DevelopmentSignal, InfrastructureSignal, MarketDataSource, MarketObservation,
    Region, RegionSignalBatch,
};

pub(crate) fn parse_records<R: Read>(
    reader: R,
) -> Result<Vec<RegionSignalBatch>, SignalImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut batches = Vec::new();

    for (index, record) in csv_reader.deserialize::<SignalRow>().enumerate() {
        let row = record?;
        let line = index + 2;
        batches.push(row.into_batch(line)?);
    }

    Ok(batches)
}

#[derive(Debug, Deserialize)]
struct SignalRow {
    region: String,
    observed_on: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    change_count: Option<u32>,
    #[serde(default)]
    affected_area_m2: Option<f64>,
    #[serde(default)]
    activity_score: Option<f64>,
    #[serde(default)]
    infrastructure_score: Option<f64>,
    #[serde(default)]
    infrastructure_verified: Option<bool>,
    #[serde(default)]
    price_per_m2: Option<f64>,
    #[serde(default)]
    market_source: Option<String>,
    #[serde(default)]
    market_confidence: Option<f64>,
    #[serde(default)]
    listing_count: Option<u32>,
    #[serde(default)]
    price_momentum_pct: Option<f64>,
}

impl SignalRow {
    fn into_batch(self, line: usize) -> Result<RegionSignalBatch, SignalImportError> {
        let observed_on = NaiveDate::parse_from_str(self.observed_on.trim(), "%Y-%m-%d").map_err(
            |_| SignalImportError::InvalidDate {
                line,
                value: self.observed_on.clone(),
            },
        )?;

        let source = parse_source(self.market_source.as_deref(), line)?;

        let coordinates = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };

        Ok(RegionSignalBatch {
            region: Region {
                name: self.region,
                coordinates,
            },
            observed_on,
            development: DevelopmentSignal {
                change_count: self.change_count.unwrap_or(0),
                affected_area_m2: self.affected_area_m2.unwrap_or(0.0),
                activity_score: self.activity_score,
            },
            infrastructure: InfrastructureSignal {
                score: self.infrastructure_score,
                verified: self.infrastructure_verified.unwrap_or(false),
            },
            market: MarketObservation {
                price_per_m2: self.price_per_m2,
                source,
                confidence: self.market_confidence.unwrap_or(0.0),
                listing_count: self.listing_count.unwrap_or(0),
            },
            price_momentum_pct: self.price_momentum_pct,
        })
    }
}

fn parse_source(raw: Option<&str>, line: usize) -> Result<MarketDataSource, SignalImportError> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value.trim(),
        _ => return Ok(MarketDataSource::StaticBenchmark),
    };

    match raw.to_ascii_lowercase().as_str() {
        "live" | "live_scrape" => Ok(MarketDataSource::LiveScrape),
        "cache" | "cached" => Ok(MarketDataSource::Cached),
        "static" | "static_benchmark" => Ok(MarketDataSource::StaticBenchmark),
        _ => Err(SignalImportError::UnknownSource {
            line,
            value: raw.to_string(),
        }),
    }
}
