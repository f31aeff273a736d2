//! Provider-specific feed shapes and reducers.

mod poscon;
mod stp;
mod vatsim;

pub use poscon::{PosconFeed, PosconProvider};
pub use stp::{collect_stp, StpFeed, StpProvider};
pub use vatsim::{VatsimFeed, VatsimProvider, VatsimStatus};

use async_trait::async_trait;
use charts_common::{ChartsResult, Provider};

use crate::client::UpstreamClient;
use crate::normalize::CollectedAirports;

/// A traffic network whose live feed can be reduced to airport lists.
#[async_trait]
pub trait CoverageProvider: Send + Sync {
    fn provider(&self) -> Provider;

    /// Fetch the live feed and gather raw departure, arrival and alternate codes.
    async fn collect(&self, upstream: &UpstreamClient) -> ChartsResult<CollectedAirports>;
}
