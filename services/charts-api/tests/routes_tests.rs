//! HTTP route tests against an in-memory chart store.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use charts_api::router::create_router;
use charts_api::service::CatalogueService;
use charts_api::state::AppState;
use charts_api::telemetry::TelemetryReporter;
use coverage::{CoverageClient, CoverageEndpoints};
use storage::MemoryChartStore;
use test_utils::{
    approach_chart, chart_json, ground_chart, manifest_json, vatsim_feed, vatsim_status, FakeRoute,
    FakeUpstream,
};

const TOKEN: &str = "test-token";

fn app_with(endpoints: CoverageEndpoints) -> Router {
    let coverage = CoverageClient::new(endpoints, Duration::from_secs(5)).unwrap();
    let service =
        CatalogueService::new(Arc::new(MemoryChartStore::new()), coverage, TOKEN.to_string());
    let state = AppState::from_parts(service, TelemetryReporter::disabled("test"), None);
    create_router(Arc::new(state))
}

fn app() -> Router {
    app_with(CoverageEndpoints::default())
}

fn app_with_manifest_limit(limit: usize) -> Router {
    let coverage = CoverageClient::new(CoverageEndpoints::default(), Duration::from_secs(5)).unwrap();
    let service =
        CatalogueService::new(Arc::new(MemoryChartStore::new()), coverage, TOKEN.to_string());
    let state = AppState::from_parts(service, TelemetryReporter::disabled("test"), None)
        .with_manifest_limit(limit);
    create_router(Arc::new(state))
}

/// A manifest for one airport whose encoded size exceeds `min_bytes`.
fn large_manifest(min_bytes: usize) -> Value {
    let mut charts = Vec::new();
    let mut size = 0;
    let mut i = 0;
    while size <= min_bytes {
        let mut chart = chart_json("ground", "LPPT", &format!("LPPT_{:05}", i));
        chart["title"] = json!("Aerodrome chart ".repeat(100));
        size += chart.to_string().len();
        charts.push(chart);
        i += 1;
    }
    json!({ "charts": charts })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn update(app: &Router, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
    let mut request = Request::post("/update").header("content-type", "application/json");
    if let Some(token) = token {
        request = request.header("Token", token);
    }
    send(app, request.body(Body::from(body.to_string())).unwrap()).await
}

fn filenames(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["filename"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Charts
// ============================================================================

#[tokio::test]
async fn test_update_then_lookup_returns_full_chart() {
    let app = app();
    let mut chart = chart_json("approach", "LPPT", "LPPT_IAC_04");
    chart["runways"] = json!(["03"]);
    chart["subtype"] = json!("RNP");

    let (status, body) = update(&app, Some(TOKEN), &json!({ "charts": [chart] })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "codes": ["LPPT"] }));

    let (status, body) = get(&app, "/charts/LPPT").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filenames(&body), ["LPPT_IAC_04"]);

    let returned = &body[0];
    assert_eq!(returned["type"], "approach");
    assert_eq!(returned["runways"], json!(["03"]));
    assert_eq!(returned["subtype"], "RNP");
    assert_eq!(returned["source"]["name"], "NAV Portugal");
    assert_eq!(returned["source"]["url"], "https://www.nav.pt/ais");
    assert_eq!(returned["source"]["contributor"], "octocat");
    assert_eq!(returned["source"]["cached"], true);
}

#[tokio::test]
async fn test_second_manifest_replaces_instead_of_merging() {
    let app = app();

    let first = manifest_json(&[
        approach_chart("LPPT", "LPPT_IAC_03"),
        ground_chart("LPPT", "LPPT_ADC"),
    ]);
    let (status, _) = update(&app, Some(TOKEN), &first).await;
    assert_eq!(status, StatusCode::OK);

    let second = manifest_json(&[approach_chart("LPPT", "LPPT_IAC_03")]);
    let (status, _) = update(&app, Some(TOKEN), &second).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/charts/LPPT").await;
    assert_eq!(filenames(&body), ["LPPT_IAC_03"]);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let (status, body) = get(&app(), "/charts/ZZZZ").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_code_is_rejected() {
    let (status, body) = get(&app(), "/charts/LP1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_lowercase_lookup_finds_charts() {
    let app = app();
    update(&app, Some(TOKEN), &manifest_json(&[ground_chart("EDDM", "EDDM_ADC")])).await;

    let (status, body) = get(&app, "/charts/eddm").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(filenames(&body), ["EDDM_ADC"]);
}

#[tokio::test]
async fn test_categorized_groups_by_type() {
    let app = app();
    let manifest = manifest_json(&[
        approach_chart("LPPT", "LPPT_01"),
        ground_chart("LPPT", "LPPT_02"),
        approach_chart("LPPT", "LPPT_03"),
    ]);
    update(&app, Some(TOKEN), &manifest).await;

    let (status, body) = get(&app, "/charts/LPPT/categorized").await;
    assert_eq!(status, StatusCode::OK);

    let groups = body.as_object().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(filenames(&body["approach"]), ["LPPT_01", "LPPT_03"]);
    assert_eq!(filenames(&body["ground"]), ["LPPT_02"]);
}

#[tokio::test]
async fn test_codes_lists_every_airport_sorted() {
    let app = app();
    let (_, body) = get(&app, "/codes").await;
    assert_eq!(body, json!([]));

    let manifest = manifest_json(&[
        ground_chart("LPPT", "LPPT_ADC"),
        ground_chart("EDDM", "EDDM_ADC"),
    ]);
    update(&app, Some(TOKEN), &manifest).await;

    let (status, body) = get(&app, "/codes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["EDDM", "LPPT"]));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_without_valid_token_is_unauthorized() {
    let app = app();
    let manifest = manifest_json(&[ground_chart("LPPT", "LPPT_ADC")]);

    for token in [None, Some("wrong")] {
        let (status, body) = update(&app, token, &manifest).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert!(!body["message"].as_str().unwrap().contains("wrong"));
    }

    let (status, _) = get(&app, "/charts/LPPT").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unauthorized_wins_over_malformed_body() {
    let (status, _) = update(&app(), Some("wrong"), &json!({ "nope": true })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_manifest_is_rejected_without_mutation() {
    let app = app();
    let mut broken = chart_json("ground", "LPPT", "LPPT_ADC");
    broken.as_object_mut().unwrap().remove("title");

    let body = json!([chart_json("ground", "EDDM", "EDDM_ADC"), broken]);
    let (status, response) = update(&app, Some(TOKEN), &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["message"].as_str().unwrap().contains("charts[1]"));

    let (_, codes) = get(&app, "/codes").await;
    assert_eq!(codes, json!([]));
}

#[tokio::test]
async fn test_manifest_above_two_mebibytes_is_accepted() {
    let app = app();
    let manifest = large_manifest(3 * 1024 * 1024);
    let expected = manifest["charts"].as_array().unwrap().len();

    let (status, body) = update(&app, Some(TOKEN), &manifest).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body, json!({ "codes": ["LPPT"] }));

    let (_, charts) = get(&app, "/charts/LPPT").await;
    assert_eq!(charts.as_array().unwrap().len(), expected);
}

#[tokio::test]
async fn test_manifest_over_limit_is_json_error() {
    let app = app_with_manifest_limit(16 * 1024);
    let manifest = large_manifest(32 * 1024);

    let (status, body) = update(&app, Some(TOKEN), &manifest).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert!(body["message"].as_str().unwrap().contains("16384"));

    let (_, codes) = get(&app, "/codes").await;
    assert_eq!(codes, json!([]));
}

#[tokio::test]
async fn test_oversized_manifest_without_token_is_unauthorized() {
    let app = app_with_manifest_limit(16 * 1024);
    let (status, _) = update(&app, None, &large_manifest(32 * 1024)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Coverage
// ============================================================================

#[tokio::test]
async fn test_coverage_unknown_provider() {
    let (status, body) = get(&app(), "/coverage/ivao").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_coverage_surfaces_upstream_status() {
    let upstream = FakeUpstream::start(|_| vec![FakeRoute::status("/status.json", 503)]).await;
    let app = app_with(CoverageEndpoints {
        vatsim_status_url: upstream.url("/status.json"),
        ..CoverageEndpoints::default()
    });

    let (status, body) = get(&app, "/coverage/vatsim").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "UPSTREAM_FAILURE");
    assert!(body.get("departure_airports").is_none());
}

#[tokio::test]
async fn test_coverage_returns_cleaned_statistics() {
    let upstream = FakeUpstream::start(|base| {
        vec![
            FakeRoute::ok("/status.json", vatsim_status(&[format!("{}/feed", base)])),
            FakeRoute::ok("/feed", vatsim_feed()),
        ]
    })
    .await;
    let app = app_with(CoverageEndpoints {
        vatsim_status_url: upstream.url("/status.json"),
        ..CoverageEndpoints::default()
    });

    let (status, body) = get(&app, "/coverage/VATSIM").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], "vatsim");
    assert_eq!(body["departure_airports"], json!(["LPPT", "EDDM"]));
    assert_eq!(body["arrival_airports"], json!(["EDDM", "LPPT"]));
    assert_eq!(body["alternate_airports"], json!(["EDDN"]));
}

// ============================================================================
// Documentation
// ============================================================================

#[tokio::test]
async fn test_docs_are_served() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&html).contains("/openapi.yaml"));

    let response = app
        .oneshot(Request::get("/openapi.yaml").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "application/yaml");
    let yaml = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let yaml = String::from_utf8_lossy(&yaml);
    assert!(yaml.starts_with("openapi: 3.0"));
    assert!(yaml.contains("/update:"));
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}
