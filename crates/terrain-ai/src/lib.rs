//! Core library for the land acquisition scoring service.
//!
//! The interesting logic lives under [`workflows::scoring`]: tier
//! classification, relative valuation, multiplier rules, budget sizing, and
//! the benchmark-drift monitor. Everything network-bound (scrapers, satellite
//! change detection, geodata lookups) happens outside this crate and arrives
//! as already-resolved signal batches.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
