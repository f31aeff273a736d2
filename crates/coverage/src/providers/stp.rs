//! SimToolkitPro coverage.
//!
//! The feed maps opaque keys to fixed-position arrays. Index 7 holds the
//! departure and index 8 the arrival; `-` marks an unknown airport. There
//! is no alternate data.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use charts_common::{ChartsResult, FetchStage, Provider};

use super::CoverageProvider;
use crate::client::UpstreamClient;
use crate::normalize::CollectedAirports;

const DEPARTURE_INDEX: usize = 7;
const ARRIVAL_INDEX: usize = 8;
const UNKNOWN_AIRPORT: &str = "-";

pub type StpFeed = HashMap<String, Vec<Value>>;

fn airport_at(row: &[Value], index: usize) -> Option<String> {
    row.get(index)
        .and_then(Value::as_str)
        .filter(|code| *code != UNKNOWN_AIRPORT)
        .map(str::to_string)
}

pub fn collect_stp(feed: StpFeed) -> CollectedAirports {
    let mut collected = CollectedAirports::default();

    for row in feed.values() {
        collected
            .departures
            .extend(airport_at(row, DEPARTURE_INDEX));
        collected.arrivals.extend(airport_at(row, ARRIVAL_INDEX));
    }

    collected
}

pub struct StpProvider {
    url: String,
}

impl StpProvider {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl CoverageProvider for StpProvider {
    fn provider(&self) -> Provider {
        Provider::Stp
    }

    async fn collect(&self, upstream: &UpstreamClient) -> ChartsResult<CollectedAirports> {
        let feed: StpFeed = upstream.get_json(&self.url, FetchStage::StpFeed).await?;
        Ok(collect_stp(feed))
    }
}
