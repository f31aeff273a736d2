//! POSCON coverage.

use async_trait::async_trait;
use serde::Deserialize;

use charts_common::{ChartsResult, FetchStage, Provider};

use super::CoverageProvider;
use crate::client::UpstreamClient;
use crate::normalize::CollectedAirports;

#[derive(Debug, Deserialize)]
pub struct PosconFeed {
    #[serde(default)]
    pub flights: Vec<PosconFlight>,
}

#[derive(Debug, Deserialize)]
pub struct PosconFlight {
    #[serde(default)]
    pub flightplan: Option<PosconFlightPlan>,
}

#[derive(Debug, Deserialize)]
pub struct PosconFlightPlan {
    pub dep: Option<String>,
    pub dest: Option<String>,
    pub altnt: Option<String>,
    pub altnt2: Option<String>,
}

impl PosconFeed {
    pub fn collect(self) -> CollectedAirports {
        let mut collected = CollectedAirports::default();

        for plan in self.flights.into_iter().filter_map(|f| f.flightplan) {
            collected.departures.extend(plan.dep);
            collected.arrivals.extend(plan.dest);
            for alternate in [plan.altnt, plan.altnt2].into_iter().flatten() {
                if !alternate.is_empty() {
                    collected.alternates.push(alternate);
                }
            }
        }

        collected
    }
}

pub struct PosconProvider {
    url: String,
}

impl PosconProvider {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl CoverageProvider for PosconProvider {
    fn provider(&self) -> Provider {
        Provider::Poscon
    }

    async fn collect(&self, upstream: &UpstreamClient) -> ChartsResult<CollectedAirports> {
        let feed: PosconFeed = upstream.get_json(&self.url, FetchStage::PosconFeed).await?;
        Ok(feed.collect())
    }
}
