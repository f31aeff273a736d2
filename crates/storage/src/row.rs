//! Database row mapping for charts.

use charts_common::{Chart, ChartKind, ChartRecord, ChartsError, ChartsResult, Subtype};
use sqlx::types::Json;
use sqlx::FromRow;

/// Internal row type for chart queries.
#[derive(Debug, FromRow)]
pub struct ChartRow {
    pub title: String,
    #[sqlx(rename = "type")]
    pub chart_type: String,
    pub filename: String,
    pub filetype: String,
    pub source: Json<serde_json::Value>,
    pub icao_code: String,
    pub subtype: Option<String>,
    pub runways: Option<Vec<String>>,
    pub sids: Option<Vec<String>>,
    pub stars: Option<Vec<String>>,
}

impl ChartRow {
    /// Decode through the chart model, the same path manifests take.
    pub fn into_chart(self) -> ChartsResult<Chart> {
        let filename = self.filename.clone();
        let subtype = self
            .subtype
            .map(|column| decode_subtype(&self.chart_type, column));
        let record = ChartRecord {
            title: self.title,
            chart_type: self.chart_type,
            filename: self.filename,
            filetype: self.filetype,
            source: self.source.0,
            icao_code: self.icao_code,
            subtype,
            runways: self.runways,
            sids: self.sids,
            stars: self.stars,
        };
        Chart::try_from(record).map_err(|e| {
            ChartsError::DatabaseError(format!("Stored chart {} is invalid: {}", filename, e))
        })
    }
}

/// Column values for writing a chart, in table column order.
#[derive(Debug, Clone)]
pub struct ChartParams {
    pub title: String,
    pub chart_type: String,
    pub filename: String,
    pub filetype: String,
    pub source: serde_json::Value,
    pub icao_code: String,
    pub subtype: Option<String>,
    pub runways: Option<Vec<String>>,
    pub sids: Option<Vec<String>>,
    pub stars: Option<Vec<String>>,
}

impl From<&Chart> for ChartParams {
    fn from(chart: &Chart) -> Self {
        let record = chart.to_record();
        Self {
            title: record.title,
            chart_type: record.chart_type,
            filename: record.filename,
            filetype: record.filetype,
            source: record.source,
            icao_code: record.icao_code,
            subtype: record.subtype.as_ref().map(encode_subtype),
            runways: record.runways,
            sids: record.sids,
            stars: record.stars,
        }
    }
}

/// Subtypes live in a TEXT column; lists are stored as a JSON array literal.
pub fn encode_subtype(subtype: &Subtype) -> String {
    match subtype {
        Subtype::One(s) => s.clone(),
        Subtype::Many(list) => serde_json::to_string(list).unwrap_or_default(),
    }
}

/// Only departure and arrival charts can hold a list; other types always
/// read the column back as a single subtype.
pub fn decode_subtype(chart_type: &str, column: String) -> Subtype {
    let takes_list = matches!(chart_type, ChartKind::DEPARTURE | ChartKind::ARRIVAL);
    if takes_list && column.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(&column) {
            return Subtype::Many(list);
        }
    }
    Subtype::One(column)
}
