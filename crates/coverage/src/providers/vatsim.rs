//! VATSIM coverage.
//!
//! VATSIM asks clients to read the status document first and pick one of
//! the listed data-feed mirrors at random, spreading load across mirrors.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::debug;

use charts_common::{ChartsError, ChartsResult, FetchStage, Provider};

use super::CoverageProvider;
use crate::client::UpstreamClient;
use crate::normalize::CollectedAirports;

/// Pilots file this literal when they have no alternate.
const NO_ALTERNATE: &str = "NONE";

#[derive(Debug, Deserialize)]
pub struct VatsimStatus {
    pub data: VatsimStatusData,
}

#[derive(Debug, Deserialize)]
pub struct VatsimStatusData {
    /// Data-feed mirror URLs
    #[serde(default)]
    pub v3: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VatsimFeed {
    #[serde(default)]
    pub pilots: Vec<VatsimPilot>,
}

#[derive(Debug, Deserialize)]
pub struct VatsimPilot {
    /// Null for pilots flying without a filed plan
    #[serde(default)]
    pub flight_plan: Option<VatsimFlightPlan>,
}

#[derive(Debug, Deserialize)]
pub struct VatsimFlightPlan {
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub alternate: Option<String>,
}

impl VatsimFeed {
    pub fn collect(self) -> CollectedAirports {
        let mut collected = CollectedAirports::default();

        for plan in self.pilots.into_iter().filter_map(|p| p.flight_plan) {
            collected.departures.extend(plan.departure);
            collected.arrivals.extend(plan.arrival);
            if let Some(alternate) = plan.alternate.filter(|a| a != NO_ALTERNATE) {
                collected.alternates.push(alternate);
            }
        }

        collected
    }
}

pub struct VatsimProvider {
    status_url: String,
}

impl VatsimProvider {
    pub fn new(status_url: String) -> Self {
        Self { status_url }
    }
}

fn pick_mirror(mirrors: &[String]) -> Option<String> {
    mirrors.choose(&mut rand::thread_rng()).cloned()
}

#[async_trait]
impl CoverageProvider for VatsimProvider {
    fn provider(&self) -> Provider {
        Provider::Vatsim
    }

    async fn collect(&self, upstream: &UpstreamClient) -> ChartsResult<CollectedAirports> {
        let status: VatsimStatus = upstream
            .get_json(&self.status_url, FetchStage::VatsimStatus)
            .await?;

        let mirror = pick_mirror(&status.data.v3).ok_or_else(|| ChartsError::UpstreamUnavailable {
            stage: FetchStage::VatsimStatus,
            message: "status document lists no data feed mirrors".to_string(),
        })?;
        debug!(mirror = %mirror, "Selected VATSIM data feed mirror");

        let feed: VatsimFeed = upstream
            .get_json(&mirror, FetchStage::VatsimDataFeed)
            .await?;

        Ok(feed.collect())
    }
}
