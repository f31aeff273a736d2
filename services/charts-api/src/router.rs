//! Route table and middleware.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderName, Method},
    routing::{get, post},
    Extension, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::handlers::update::TOKEN_HEADER;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([HeaderName::from_static(TOKEN_HEADER)]);

    Router::new()
        // Documentation
        .route("/", get(handlers::docs::swagger_ui_handler))
        .route("/openapi.yaml", get(handlers::docs::openapi_yaml_handler))
        // Charts
        .route("/charts/:code", get(handlers::charts::charts_handler))
        .route(
            "/charts/:code/categorized",
            get(handlers::charts::categorized_handler),
        )
        .route("/codes", get(handlers::codes::codes_handler))
        .route(
            "/update",
            post(handlers::update::update_handler)
                .layer(DefaultBodyLimit::max(state.max_manifest_bytes)),
        )
        // Coverage
        .route(
            "/coverage/:provider",
            get(handlers::coverage::coverage_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
