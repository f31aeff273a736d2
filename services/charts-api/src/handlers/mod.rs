//! HTTP request handlers for the chart catalogue API.

pub mod charts;
pub mod codes;
pub mod coverage;
pub mod docs;
pub mod health;
pub mod update;

use charts_common::ChartsError;

use crate::error::ApiError;
use crate::state::AppState;

/// Report a failed request and turn it into a response error.
pub(crate) fn reject(state: &AppState, route: &str, err: ChartsError) -> ApiError {
    state.telemetry.report(&err, route);
    ApiError(err)
}
