//! Known airport codes.

use std::sync::Arc;

use axum::{extract::Extension, Json};

use super::reject;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /codes - Every airport with charts, sorted
pub async fn codes_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> ApiResult<Json<Vec<String>>> {
    let codes = state
        .service
        .list_codes()
        .await
        .map_err(|e| reject(&state, "/codes", e))?;

    Ok(Json(codes.into_iter().map(String::from).collect()))
}
