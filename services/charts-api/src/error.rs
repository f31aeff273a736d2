//! HTTP error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use charts_common::ChartsError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// A [`ChartsError`] rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(pub ChartsError);

impl From<ChartsError> for ApiError {
    fn from(err: ChartsError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
    }

    pub fn body(&self) -> ErrorBody {
        let message = match &self.0 {
            // Never echo anything about the submitted token
            ChartsError::Unauthorized => "Missing or invalid update token".to_string(),
            // Store and internal details stay in the logs
            err if err.is_server_fault() => "Internal server error".to_string(),
            err => err.to_string(),
        };

        ErrorBody {
            code: self.0.error_code().to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
