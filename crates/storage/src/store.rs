//! The storage contract shared by all chart backends.

use std::collections::BTreeSet;

use async_trait::async_trait;
use charts_common::{Chart, ChartsResult, IcaoCode};

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No chart with the filename existed.
    Inserted,
    /// Exactly one chart with the filename existed and was overwritten.
    Updated,
    /// Several rows shared the filename; all were removed and the chart
    /// written once.
    Reinserted { removed: u64 },
}

/// Persistent chart storage.
///
/// Every operation is atomic and committed on success. Charts are keyed by
/// `filename`, which is unique across all airports.
#[async_trait]
pub trait ChartStore: Send + Sync {
    /// Create the backing schema if it does not exist. Safe to call on every startup.
    async fn initialize(&self) -> ChartsResult<()>;

    /// Insert a chart, or overwrite the chart with the same filename.
    async fn upsert(&self, chart: &Chart) -> ChartsResult<UpsertOutcome>;

    /// Remove every chart for an airport. Returns the number removed.
    async fn delete_all_for_code(&self, icao_code: &IcaoCode) -> ChartsResult<u64>;

    /// All charts for an airport, ordered by filename.
    ///
    /// Fails with `NoChartsForAirport` when the airport has none.
    async fn list_by_code(&self, icao_code: &IcaoCode) -> ChartsResult<Vec<Chart>>;

    /// Every airport with at least one chart.
    async fn list_known_codes(&self) -> ChartsResult<BTreeSet<IcaoCode>>;

    /// Release backend resources on shutdown.
    async fn close(&self) {}
}
