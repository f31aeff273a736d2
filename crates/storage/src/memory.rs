//! In-process chart storage.
//!
//! Behaves like the PostgreSQL store, including the filename ordering of
//! lookups, without any external service. Used by tests and the
//! `--memory-store` development mode.

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use charts_common::{Chart, ChartsError, ChartsResult, IcaoCode};

use crate::store::{ChartStore, UpsertOutcome};

#[derive(Default)]
pub struct MemoryChartStore {
    charts: RwLock<Vec<Chart>>,
}

impl MemoryChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored chart, in storage order.
    pub async fn snapshot(&self) -> Vec<Chart> {
        self.charts.read().await.clone()
    }
}

#[async_trait]
impl ChartStore for MemoryChartStore {
    async fn initialize(&self) -> ChartsResult<()> {
        Ok(())
    }

    async fn upsert(&self, chart: &Chart) -> ChartsResult<UpsertOutcome> {
        let mut charts = self.charts.write().await;
        let matches = charts
            .iter()
            .filter(|c| c.filename == chart.filename)
            .count();

        let outcome = match matches {
            0 => {
                charts.push(chart.clone());
                UpsertOutcome::Inserted
            }
            1 => {
                if let Some(existing) = charts.iter_mut().find(|c| c.filename == chart.filename) {
                    *existing = chart.clone();
                }
                UpsertOutcome::Updated
            }
            n => {
                charts.retain(|c| c.filename != chart.filename);
                charts.push(chart.clone());
                UpsertOutcome::Reinserted { removed: n as u64 }
            }
        };

        Ok(outcome)
    }

    async fn delete_all_for_code(&self, icao_code: &IcaoCode) -> ChartsResult<u64> {
        let mut charts = self.charts.write().await;
        let before = charts.len();
        charts.retain(|c| &c.icao_code != icao_code);
        Ok((before - charts.len()) as u64)
    }

    async fn list_by_code(&self, icao_code: &IcaoCode) -> ChartsResult<Vec<Chart>> {
        let mut found: Vec<Chart> = self
            .charts
            .read()
            .await
            .iter()
            .filter(|c| &c.icao_code == icao_code)
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(ChartsError::NoChartsForAirport(icao_code.to_string()));
        }

        found.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(found)
    }

    async fn list_known_codes(&self) -> ChartsResult<BTreeSet<IcaoCode>> {
        Ok(self
            .charts
            .read()
            .await
            .iter()
            .map(|c| c.icao_code.clone())
            .collect())
    }
}
