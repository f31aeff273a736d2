//! Live traffic coverage.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};

use charts_common::CoverageStatistics;

use super::reject;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /coverage/:provider - Airports seen in a network's live traffic
pub async fn coverage_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(provider): Path<String>,
) -> ApiResult<Json<CoverageStatistics>> {
    state
        .service
        .get_coverage(&provider)
        .await
        .map(Json)
        .map_err(|e| reject(&state, "/coverage/:provider", e))
}
