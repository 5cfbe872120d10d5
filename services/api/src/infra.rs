use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use terrain_ai::config::AcquisitionConfig;
use terrain_ai::workflows::scoring::{
    AlertError, AlertPublisher, BudgetSizer, DriftAlertNotice, DriftHistoryRepository,
    DriftSnapshot, EngineSettings, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Per-region drift histories behind one process-local mutex. Histories are
/// independent per region, so this is stricter serialization than required,
/// but it keeps the demo storage simple.
#[derive(Default, Clone)]
pub(crate) struct InMemoryDriftHistoryRepository {
    histories: Arc<Mutex<HashMap<String, Vec<DriftSnapshot>>>>,
}

impl DriftHistoryRepository for InMemoryDriftHistoryRepository {
    fn append(&self, snapshot: DriftSnapshot) -> Result<(), RepositoryError> {
        let mut guard = self.histories.lock().expect("drift store mutex poisoned");
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
        let guard = self.histories.lock().expect("drift store mutex poisoned");
        Ok(guard.get(region).cloned().unwrap_or_default())
    }

    fn regions(&self) -> Result<Vec<String>, RepositoryError> {
        let guard = self.histories.lock().expect("drift store mutex poisoned");
        Ok(guard.keys().cloned().collect())
    }

    fn prune_before(&self, cutoff: NaiveDate) -> Result<usize, RepositoryError> {
        let mut guard = self.histories.lock().expect("drift store mutex poisoned");
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
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<DriftAlertNotice>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, notice: DriftAlertNotice) -> Result<(), AlertError> {
        let mut guard = self.events.lock().expect("alert mutex poisoned");
        guard.push(notice);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<DriftAlertNotice> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

pub(crate) fn engine_settings(acquisition: &AcquisitionConfig) -> EngineSettings {
    EngineSettings {
        sizer: BudgetSizer::new(acquisition.min_plot_m2, acquisition.max_plot_m2),
        ..EngineSettings::default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
