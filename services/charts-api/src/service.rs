//! Catalogue operations behind the HTTP handlers.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use metrics::counter;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use charts_common::{Chart, ChartsError, ChartsResult, CoverageStatistics, IcaoCode, Provider};
use coverage::CoverageClient;
use storage::ChartStore;

/// Charts grouped by their `type` discriminator.
pub type CategorizedCharts = BTreeMap<String, Vec<Chart>>;

/// Stateless orchestration over the chart store and coverage providers.
pub struct CatalogueService {
    store: Arc<dyn ChartStore>,
    coverage: CoverageClient,
    update_token: String,

    /// Serializes manifest replacements within this process.
    replace_lock: Mutex<()>,
}

impl CatalogueService {
    pub fn new(store: Arc<dyn ChartStore>, coverage: CoverageClient, update_token: String) -> Self {
        Self {
            store,
            coverage,
            update_token,
            replace_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<dyn ChartStore> {
        &self.store
    }

    /// All charts for an airport.
    #[instrument(skip(self))]
    pub async fn get_charts(&self, code: &str) -> ChartsResult<Vec<Chart>> {
        let code = IcaoCode::parse(code)?;
        counter!("charts_lookups_total").increment(1);
        self.store.list_by_code(&code).await
    }

    /// All charts for an airport, grouped by chart type.
    pub async fn get_categorized_charts(&self, code: &str) -> ChartsResult<CategorizedCharts> {
        let charts = self.get_charts(code).await?;
        Ok(categorize(charts))
    }

    /// Every airport with charts in the catalogue.
    pub async fn list_codes(&self) -> ChartsResult<BTreeSet<IcaoCode>> {
        self.store.list_known_codes().await
    }

    /// Check the shared update secret.
    pub fn authorize(&self, token: Option<&str>) -> ChartsResult<()> {
        match token {
            Some(token) if !self.update_token.is_empty() && tokens_match(token, &self.update_token) => {
                Ok(())
            }
            _ => Err(ChartsError::Unauthorized),
        }
    }

    /// Replace all charts for every airport named in the manifest.
    ///
    /// Airports already in the catalogue are cleared first so charts missing
    /// from the manifest disappear. Returns the airports the manifest covers.
    #[instrument(skip(self, manifest, token), fields(charts = manifest.len()))]
    pub async fn replace_manifest(
        &self,
        manifest: Vec<Chart>,
        token: Option<&str>,
    ) -> ChartsResult<BTreeSet<IcaoCode>> {
        self.authorize(token)?;
        let _guard = self.replace_lock.lock().await;

        let incoming: BTreeSet<IcaoCode> = manifest.iter().map(|c| c.icao_code.clone()).collect();
        let known = self.store.list_known_codes().await?;

        for code in known.intersection(&incoming) {
            let removed = self.store.delete_all_for_code(code).await?;
            info!(icao_code = %code, removed, "Cleared charts for replacement");
        }

        for chart in &manifest {
            self.store.upsert(chart).await?;
        }

        counter!("manifest_updates_total").increment(1);
        info!(codes = incoming.len(), "Manifest applied");

        Ok(incoming)
    }

    /// Live coverage statistics for a provider name, matched case-insensitively.
    pub async fn get_coverage(&self, provider: &str) -> ChartsResult<CoverageStatistics> {
        let provider: Provider = provider.parse()?;
        counter!("coverage_requests_total", "provider" => provider.as_str()).increment(1);
        self.coverage.statistics(provider).await
    }
}

/// Compare secrets without stopping at the first differing byte. Only the
/// length can leak through timing.
fn tokens_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Group charts by type in one pass, keeping retrieval order within each group.
pub fn categorize(charts: Vec<Chart>) -> CategorizedCharts {
    let mut groups = CategorizedCharts::new();
    for chart in charts {
        groups
            .entry(chart.chart_type().to_string())
            .or_default()
            .push(chart);
    }
    groups
}

/// Decode a manifest body: either `{"charts": [...]}` or a bare list.
pub fn parse_manifest(body: &[u8]) -> ChartsResult<Vec<Chart>> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ChartsError::Validation(format!("Manifest is not valid JSON: {}", e)))?;

    let entries = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("charts") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ChartsError::Validation(
                    "Manifest must contain a 'charts' list".to_string(),
                ))
            }
        },
        _ => {
            return Err(ChartsError::Validation(
                "Manifest must be a list of charts".to_string(),
            ))
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            Chart::from_value(entry).map_err(|e| {
                let detail = match e {
                    ChartsError::Validation(message) => message,
                    other => other.to_string(),
                };
                ChartsError::Validation(format!("charts[{}]: {}", i, detail))
            })
        })
        .collect()
}
