//! Application state for the chart catalogue API.

use std::sync::Arc;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use coverage::CoverageClient;
use storage::{ChartStore, MemoryChartStore, PgChartStore};

use crate::config::{Settings, DEFAULT_MAX_MANIFEST_BYTES};
use crate::service::CatalogueService;
use crate::telemetry::TelemetryReporter;

/// Shared application state.
pub struct AppState {
    pub service: Arc<CatalogueService>,

    pub telemetry: TelemetryReporter,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub metrics: Option<PrometheusHandle>,

    /// Body size limit for `/update`.
    pub max_manifest_bytes: usize,
}

impl AppState {
    /// Connect the store, bootstrap its schema and build the service.
    pub async fn new(settings: &Settings, metrics: Option<PrometheusHandle>) -> Result<Self> {
        let store: Arc<dyn ChartStore> = if settings.memory_store {
            warn!("Using in-memory chart store; charts are lost on restart");
            Arc::new(MemoryChartStore::new())
        } else {
            let store = PgChartStore::connect(&settings.store_config())
                .await
                .context("Failed to connect to the chart database")?;
            Arc::new(store)
        };

        store
            .initialize()
            .await
            .context("Failed to initialize the chart schema")?;
        info!("Chart store ready");

        let coverage = CoverageClient::new(settings.coverage_endpoints(), settings.upstream_timeout())
            .context("Failed to build coverage client")?;

        if settings.update_token.is_empty() {
            warn!("UPDATE_TOKEN is empty; manifest updates will always be rejected");
        }

        let service = CatalogueService::new(store, coverage, settings.update_token.clone());
        let telemetry = TelemetryReporter::new(
            reqwest::Client::new(),
            settings.telemetry_uri.clone(),
            settings.app_name.clone(),
        );
        if telemetry.is_enabled() {
            info!("Error telemetry enabled");
        } else {
            info!("TELEMETRY_URI not set; server errors are only logged");
        }

        Ok(Self::from_parts(service, telemetry, metrics)
            .with_manifest_limit(settings.max_manifest_bytes))
    }

    pub fn from_parts(
        service: CatalogueService,
        telemetry: TelemetryReporter,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            service: Arc::new(service),
            telemetry,
            metrics,
            max_manifest_bytes: DEFAULT_MAX_MANIFEST_BYTES,
        }
    }

    pub fn with_manifest_limit(mut self, max_manifest_bytes: usize) -> Self {
        self.max_manifest_bytes = max_manifest_bytes;
        self
    }
}
