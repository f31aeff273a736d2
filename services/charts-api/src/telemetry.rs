//! Error reporting to an external collector.
//!
//! Each server error is sent as one JSON `TelemetryEvent` in a `POST` to
//! `TELEMETRY_URI`. Any collector that accepts that body works; Sentry DSNs
//! are not understood.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use charts_common::ChartsError;

/// One reported failure.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub service: String,
    pub route: String,
    pub message: String,
}

/// Logs request failures and forwards 5xx-class ones to the collector.
#[derive(Debug, Clone)]
pub struct TelemetryReporter {
    client: Client,
    endpoint: Option<String>,
    app_name: String,
}

impl TelemetryReporter {
    pub fn new(client: Client, endpoint: Option<String>, app_name: String) -> Self {
        Self {
            client,
            endpoint: endpoint.filter(|e| !e.is_empty()),
            app_name,
        }
    }

    /// A reporter that only logs.
    pub fn disabled(app_name: impl Into<String>) -> Self {
        Self::new(Client::new(), None, app_name.into())
    }

    pub fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    pub fn event(&self, err: &ChartsError, route: &str) -> TelemetryEvent {
        TelemetryEvent {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            service: self.app_name.clone(),
            route: route.to_string(),
            message: err.to_string(),
        }
    }

    /// Record a failed request. Delivery runs on a spawned task and never
    /// affects the response.
    pub fn report(&self, err: &ChartsError, route: &str) {
        if err.http_status_code() < 500 {
            return;
        }

        error!(route = %route, code = err.error_code(), error = %err, "Request failed");

        let Some(endpoint) = self.endpoint.clone() else {
            return;
        };

        let event = self.event(err, route);
        let client = self.client.clone();
        tokio::spawn(async move {
            match client.post(&endpoint).json(&event).send().await {
                Ok(response) if !response.status().is_success() => {
                    warn!(status = response.status().as_u16(), "Telemetry collector rejected event");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Failed to deliver telemetry event"),
            }
        });
    }
}
