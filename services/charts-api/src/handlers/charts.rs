//! Chart lookup handlers.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    Json,
};

use charts_common::Chart;

use super::reject;
use crate::error::ApiResult;
use crate::service::CategorizedCharts;
use crate::state::AppState;

/// GET /charts/:code - All charts for an airport
pub async fn charts_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<Vec<Chart>>> {
    state
        .service
        .get_charts(&code)
        .await
        .map(Json)
        .map_err(|e| reject(&state, "/charts/:code", e))
}

/// GET /charts/:code/categorized - Charts grouped by type
pub async fn categorized_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<CategorizedCharts>> {
    state
        .service
        .get_categorized_charts(&code)
        .await
        .map(Json)
        .map_err(|e| reject(&state, "/charts/:code/categorized", e))
}
