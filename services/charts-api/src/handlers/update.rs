//! Manifest replacement.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Extension},
    http::{HeaderMap, StatusCode},
    Json,
};

use charts_common::ChartsError;
use serde::Serialize;

use super::reject;
use crate::error::ApiResult;
use crate::service::parse_manifest;
use crate::state::AppState;

/// Header carrying the shared update secret.
pub const TOKEN_HEADER: &str = "token";

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub codes: Vec<String>,
}

/// POST /update - Replace the charts of every airport in the manifest
///
/// The token is checked before the body is decoded, so an unauthorized
/// caller never learns whether the manifest was valid.
pub async fn update_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<UpdateResponse>> {
    let token = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());

    state
        .service
        .authorize(token)
        .map_err(|e| reject(&state, "/update", e))?;

    let body = body.map_err(|rejection| {
        let err = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ChartsError::PayloadTooLarge {
                limit: state.max_manifest_bytes,
            }
        } else {
            ChartsError::Validation(rejection.body_text())
        };
        reject(&state, "/update", err)
    })?;

    let manifest = parse_manifest(&body).map_err(|e| reject(&state, "/update", e))?;

    let codes = state
        .service
        .replace_manifest(manifest, token)
        .await
        .map_err(|e| reject(&state, "/update", e))?;

    Ok(Json(UpdateResponse {
        codes: codes.into_iter().map(String::from).collect(),
    }))
}
