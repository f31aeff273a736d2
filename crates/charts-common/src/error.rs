//! Error types for the chart catalogue services.

use thiserror::Error;

use crate::coverage::FetchStage;

/// Result type alias using ChartsError.
pub type ChartsResult<T> = Result<T, ChartsError>;

/// Primary error type for catalogue operations.
#[derive(Debug, Error)]
pub enum ChartsError {
    // === Client Errors ===
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("No charts found for ICAO code {0}")]
    NoChartsForAirport(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Request body exceeds the {limit} byte limit")]
    PayloadTooLarge { limit: usize },

    // === Upstream Errors ===
    #[error("Upstream failure during {stage}: HTTP {status}")]
    UpstreamFailure { stage: FetchStage, status: u16 },

    #[error("Upstream unavailable during {stage}: {message}")]
    UpstreamUnavailable { stage: FetchStage, message: String },

    // === Storage Errors ===
    #[error("Database error: {0}")]
    DatabaseError(String),

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl ChartsError {
    /// Build a validation error for a single named field.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        ChartsError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Machine-readable code used in error response bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChartsError::Validation(_) | ChartsError::InvalidParameter { .. } => "VALIDATION_ERROR",
            ChartsError::NoChartsForAirport(_) => "NOT_FOUND",
            ChartsError::Unauthorized => "UNAUTHORIZED",
            ChartsError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            ChartsError::UpstreamFailure { .. } | ChartsError::UpstreamUnavailable { .. } => {
                "UPSTREAM_FAILURE"
            }
            ChartsError::DatabaseError(_) => "DATABASE_ERROR",
            ChartsError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Upstream failures pass the provider's own status through so callers
    /// can tell an external outage apart from a fault in this service.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ChartsError::Validation(_) | ChartsError::InvalidParameter { .. } => 400,

            ChartsError::Unauthorized => 401,

            ChartsError::NoChartsForAirport(_) => 404,

            ChartsError::PayloadTooLarge { .. } => 413,

            ChartsError::UpstreamFailure { status, .. } => *status,
            ChartsError::UpstreamUnavailable { .. } => 502,

            _ => 500,
        }
    }

    /// Whether this error indicates a fault on the server side that should be
    /// reported to the telemetry collector.
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            ChartsError::DatabaseError(_) | ChartsError::InternalError(_)
        )
    }
}
