use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{DriftAlertLevel, DriftSnapshot, RegionTier};

/// Storage abstraction over per-region drift history. Histories are
/// append-only and time-ordered; regions never share a history, so
/// implementations only need to serialize writes per region.
pub trait DriftHistoryRepository: Send + Sync {
    fn append(&self, snapshot: DriftSnapshot) -> Result<(), RepositoryError>;
    /// Snapshots for one region, oldest first. Unknown regions yield an empty
    /// history, not an error.
    fn history(&self, region: &str) -> Result<Vec<DriftSnapshot>, RepositoryError>;
    fn regions(&self) -> Result<Vec<String>, RepositoryError>;
    /// Drop entries recorded before the cutoff; returns how many were removed.
    fn prune_before(&self, cutoff: NaiveDate) -> Result<usize, RepositoryError>;
}

/// Error enumeration for drift-store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("snapshot for {region} predates the latest stored entry")]
    OutOfOrder { region: String },
    #[error("drift store unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for WARNING/CRITICAL drift notifications (e-mail, chat, or
/// ticketing adapters live behind this).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, notice: DriftAlertNotice) -> Result<(), AlertError>;
}

/// Alert payload handed to notification collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftAlertNotice {
    pub region: String,
    pub tier: RegionTier,
    pub level: DriftAlertLevel,
    pub drift_pct: f64,
    pub details: BTreeMap<String, String>,
}

/// Alert dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
