//! Common test fixtures for chart catalogue tests.
//!
//! Charts are built through the same JSON decoding path that manifests use,
//! so fixtures never bypass validation.

use charts_common::Chart;
use serde_json::{json, Value};

/// A well-formed source mapping.
pub fn source_json() -> Value {
    json!({
        "name": "NAV Portugal",
        "url": "https://www.nav.pt/ais",
        "contributor": "octocat",
        "cached": true
    })
}

/// Raw manifest entry for a chart of the given type.
pub fn chart_json(chart_type: &str, icao_code: &str, filename: &str) -> Value {
    json!({
        "title": format!("{} {}", icao_code, filename),
        "type": chart_type,
        "filename": filename,
        "filetype": "application/pdf",
        "source": source_json(),
        "icao_code": icao_code
    })
}

fn build(value: Value) -> Chart {
    Chart::from_value(value).expect("fixture chart must be valid")
}

pub fn approach_chart(icao_code: &str, filename: &str) -> Chart {
    let mut value = chart_json("approach", icao_code, filename);
    value["runways"] = json!(["03"]);
    value["subtype"] = json!("ILS");
    build(value)
}

pub fn departure_chart(icao_code: &str, filename: &str) -> Chart {
    let mut value = chart_json("departure", icao_code, filename);
    value["runways"] = json!(["*"]);
    value["subtype"] = json!(["RNAV", "CONV"]);
    value["sids"] = json!(["ADSAM1N", "ESP1N"]);
    build(value)
}

pub fn arrival_chart(icao_code: &str, filename: &str) -> Chart {
    let mut value = chart_json("arrival", icao_code, filename);
    value["runways"] = json!(["03", "21"]);
    value["stars"] = json!(["ABRIX1A"]);
    build(value)
}

pub fn ground_chart(icao_code: &str, filename: &str) -> Chart {
    let mut value = chart_json("ground", icao_code, filename);
    value["subtype"] = json!("parking");
    build(value)
}

/// A chart with a discriminator outside the known variants.
pub fn base_chart(icao_code: &str, filename: &str) -> Chart {
    build(chart_json("visual", icao_code, filename))
}

/// A manifest request body in the `{"charts": [...]}` shape.
pub fn manifest_json(charts: &[Chart]) -> Value {
    json!({ "charts": charts })
}
