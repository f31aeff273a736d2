//! HTTP access to the coverage providers.

use std::time::Duration;

use metrics::counter;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use charts_common::{ChartsError, ChartsResult, CoverageStatistics, FetchStage, Provider};

use crate::providers::{CoverageProvider, PosconProvider, StpProvider, VatsimProvider};

pub const VATSIM_STATUS_URL: &str = "https://status.vatsim.net/status.json";
pub const POSCON_DATA_ENDPOINT: &str = "https://hqapi.poscon.net/online.json";
pub const STP_DATA_ENDPOINT: &str = "https://simtoolkitpro.co.uk/api/flights.stkp";

/// Upstream URLs for each provider.
#[derive(Debug, Clone)]
pub struct CoverageEndpoints {
    pub vatsim_status_url: String,
    pub poscon_url: String,
    pub stp_url: String,
}

impl Default for CoverageEndpoints {
    fn default() -> Self {
        Self {
            vatsim_status_url: VATSIM_STATUS_URL.to_string(),
            poscon_url: POSCON_DATA_ENDPOINT.to_string(),
            stp_url: STP_DATA_ENDPOINT.to_string(),
        }
    }
}

/// Thin JSON client that maps upstream failures onto the fetch stage.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> ChartsResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("librecharts-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChartsError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET a URL and decode its JSON body.
    ///
    /// A non-success status becomes `UpstreamFailure` carrying that status.
    /// No retries are attempted.
    #[instrument(skip(self))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, stage: FetchStage) -> ChartsResult<T> {
        debug!(url = %url, "Fetching upstream JSON");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(stage, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %url, "Upstream returned failure status");
            counter!("upstream_failures_total", "stage" => stage_label(stage)).increment(1);
            return Err(ChartsError::UpstreamFailure {
                stage,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| unavailable(stage, e))
    }
}

fn unavailable(stage: FetchStage, err: reqwest::Error) -> ChartsError {
    counter!("upstream_failures_total", "stage" => stage_label(stage)).increment(1);
    ChartsError::UpstreamUnavailable {
        stage,
        message: err.to_string(),
    }
}

fn stage_label(stage: FetchStage) -> &'static str {
    match stage {
        FetchStage::VatsimStatus => "vatsim_status",
        FetchStage::VatsimDataFeed => "vatsim_data_feed",
        FetchStage::PosconFeed => "poscon_feed",
        FetchStage::StpFeed => "stp_feed",
    }
}

/// Computes coverage statistics for any of the supported providers.
pub struct CoverageClient {
    upstream: UpstreamClient,
    vatsim: VatsimProvider,
    poscon: PosconProvider,
    stp: StpProvider,
}

impl CoverageClient {
    pub fn new(endpoints: CoverageEndpoints, timeout: Duration) -> ChartsResult<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(timeout)?,
            vatsim: VatsimProvider::new(endpoints.vatsim_status_url),
            poscon: PosconProvider::new(endpoints.poscon_url),
            stp: StpProvider::new(endpoints.stp_url),
        })
    }

    fn provider(&self, provider: Provider) -> &dyn CoverageProvider {
        match provider {
            Provider::Vatsim => &self.vatsim,
            Provider::Poscon => &self.poscon,
            Provider::Stp => &self.stp,
        }
    }

    /// Fetch and normalize live statistics. Any upstream error aborts the
    /// whole computation.
    pub async fn statistics(&self, provider: Provider) -> ChartsResult<CoverageStatistics> {
        let source = self.provider(provider);
        let collected = source.collect(&self.upstream).await?;
        let provider = source.provider();

        info!(
            provider = %provider,
            departures = collected.departures.len(),
            arrivals = collected.arrivals.len(),
            alternates = collected.alternates.len(),
            "Collected coverage"
        );

        Ok(collected.into_statistics(provider))
    }
}
