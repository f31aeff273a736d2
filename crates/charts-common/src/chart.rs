//! Chart definitions for the aeronautical chart catalogue.
//!
//! A chart is a set of base fields plus a [`ChartKind`] selected by the
//! `type` discriminator. On the wire and in the database a chart is a flat
//! mapping ([`ChartRecord`]); the discriminator is dispatched once, when the
//! record is converted into a [`Chart`].

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ChartsError, ChartsResult};
use crate::icao::IcaoCode;

/// Provenance of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Human-readable source name, usually the publishing authority
    pub name: String,

    /// URL for the given source
    pub url: String,

    /// GitHub profile name of the contributor
    pub contributor: String,

    /// Whether the charts are cached or served directly from the source
    #[serde(default = "default_cached")]
    pub cached: bool,
}

fn default_cached() -> bool {
    true
}

impl Source {
    /// Interpret a raw source mapping.
    ///
    /// A mapping of the wrong shape yields `None` instead of an error so that
    /// one bad source never prevents the rest of the chart from loading.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

/// A chart subtype; departure and arrival charts may list several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subtype {
    One(String),
    Many(Vec<String>),
}

/// Variant-specific fields, selected by the `type` discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    Approach {
        runways: Option<Vec<String>>,
        subtype: Option<String>,
    },
    Departure {
        runways: Option<Vec<String>>,
        subtype: Option<Subtype>,
        sids: Option<Vec<String>>,
    },
    Arrival {
        runways: Option<Vec<String>>,
        subtype: Option<Subtype>,
        stars: Option<Vec<String>>,
    },
    Ground {
        subtype: Option<String>,
    },
    /// Base chart shape. Keeps the discriminator verbatim.
    Other(String),
}

impl ChartKind {
    pub const APPROACH: &'static str = "approach";
    pub const DEPARTURE: &'static str = "departure";
    pub const ARRIVAL: &'static str = "arrival";
    pub const GROUND: &'static str = "ground";

    /// Select the variant for a discriminator. Matching is case-sensitive and
    /// anything unrecognized produces the base shape.
    pub fn from_parts(
        chart_type: &str,
        subtype: Option<Subtype>,
        runways: Option<Vec<String>>,
        sids: Option<Vec<String>>,
        stars: Option<Vec<String>>,
    ) -> ChartsResult<Self> {
        let kind = match chart_type {
            Self::APPROACH => ChartKind::Approach {
                runways,
                subtype: single_subtype(chart_type, subtype)?,
            },
            Self::DEPARTURE => ChartKind::Departure {
                runways,
                subtype: list_subtype(subtype)?,
                sids,
            },
            Self::ARRIVAL => ChartKind::Arrival {
                runways,
                subtype: list_subtype(subtype)?,
                stars,
            },
            Self::GROUND => ChartKind::Ground {
                subtype: single_subtype(chart_type, subtype)?,
            },
            other => ChartKind::Other(other.to_string()),
        };
        Ok(kind)
    }

    /// The `type` discriminator for this variant.
    pub fn type_name(&self) -> &str {
        match self {
            ChartKind::Approach { .. } => Self::APPROACH,
            ChartKind::Departure { .. } => Self::DEPARTURE,
            ChartKind::Arrival { .. } => Self::ARRIVAL,
            ChartKind::Ground { .. } => Self::GROUND,
            ChartKind::Other(name) => name,
        }
    }

    /// Runways for runway-bound charts. `["*"]` means every runway.
    pub fn runways(&self) -> Option<&[String]> {
        match self {
            ChartKind::Approach { runways, .. }
            | ChartKind::Departure { runways, .. }
            | ChartKind::Arrival { runways, .. } => runways.as_deref(),
            _ => None,
        }
    }

    pub fn subtype(&self) -> Option<Subtype> {
        match self {
            ChartKind::Approach { subtype, .. } | ChartKind::Ground { subtype } => {
                subtype.clone().map(Subtype::One)
            }
            ChartKind::Departure { subtype, .. } | ChartKind::Arrival { subtype, .. } => {
                subtype.clone()
            }
            ChartKind::Other(_) => None,
        }
    }

    pub fn sids(&self) -> Option<&[String]> {
        match self {
            ChartKind::Departure { sids, .. } => sids.as_deref(),
            _ => None,
        }
    }

    pub fn stars(&self) -> Option<&[String]> {
        match self {
            ChartKind::Arrival { stars, .. } => stars.as_deref(),
            _ => None,
        }
    }
}

fn single_subtype(chart_type: &str, subtype: Option<Subtype>) -> ChartsResult<Option<String>> {
    match subtype {
        None => Ok(None),
        Some(Subtype::One(s)) => Ok(Some(s)),
        Some(Subtype::Many(_)) => Err(ChartsError::invalid(
            "subtype",
            format!("{} charts take a single subtype", chart_type),
        )),
    }
}

/// Departure and arrival lists are stored as JSON array text, so a single
/// subtype that starts with `[` could not be told apart from a list.
fn list_subtype(subtype: Option<Subtype>) -> ChartsResult<Option<Subtype>> {
    match subtype {
        Some(Subtype::One(s)) if s.trim_start().starts_with('[') => Err(ChartsError::invalid(
            "subtype",
            "a single subtype must not start with '['; submit a list instead",
        )),
        other => Ok(other),
    }
}

/// Flat attribute mapping of a chart, as submitted in a manifest or stored
/// in a database row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: String,
    pub filename: String,
    pub filetype: String,
    pub source: serde_json::Value,
    pub icao_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Subtype>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runways: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<Vec<String>>,
}

/// A chart associated with an airport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ChartRecord")]
pub struct Chart {
    /// The chart's title
    pub title: String,

    /// Filename of the chart file, unique across the whole catalogue
    pub filename: String,

    /// Mime-type of the chart file (usually application/pdf)
    pub filetype: String,

    /// Chart provenance, `None` when the stored mapping is malformed
    pub source: Option<Source>,

    /// Airport the chart refers to
    pub icao_code: IcaoCode,

    pub kind: ChartKind,
}

impl Chart {
    /// Decode a chart from an arbitrary JSON mapping.
    pub fn from_value(value: serde_json::Value) -> ChartsResult<Self> {
        let record: ChartRecord = serde_json::from_value(value)
            .map_err(|e| ChartsError::Validation(format!("Invalid chart: {}", e)))?;
        Self::try_from(record)
    }

    /// The `type` discriminator.
    pub fn chart_type(&self) -> &str {
        self.kind.type_name()
    }

    /// Flatten back into a record with every variant field present or `None`.
    pub fn to_record(&self) -> ChartRecord {
        ChartRecord {
            title: self.title.clone(),
            chart_type: self.chart_type().to_string(),
            filename: self.filename.clone(),
            filetype: self.filetype.clone(),
            source: serde_json::to_value(&self.source).unwrap_or(serde_json::Value::Null),
            icao_code: self.icao_code.to_string(),
            subtype: self.kind.subtype(),
            runways: self.kind.runways().map(<[String]>::to_vec),
            sids: self.kind.sids().map(<[String]>::to_vec),
            stars: self.kind.stars().map(<[String]>::to_vec),
        }
    }
}

impl TryFrom<ChartRecord> for Chart {
    type Error = ChartsError;

    fn try_from(record: ChartRecord) -> Result<Self, Self::Error> {
        if record.filename.trim().is_empty() {
            return Err(ChartsError::invalid("filename", "must not be empty"));
        }
        let icao_code = IcaoCode::parse(&record.icao_code)?;
        let kind = ChartKind::from_parts(
            &record.chart_type,
            record.subtype,
            record.runways,
            record.sids,
            record.stars,
        )?;

        Ok(Chart {
            title: record.title,
            filename: record.filename,
            filetype: record.filetype,
            source: Source::from_value(&record.source),
            icao_code,
            kind,
        })
    }
}

impl Serialize for Chart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("type", self.chart_type())?;
        map.serialize_entry("filename", &self.filename)?;
        map.serialize_entry("filetype", &self.filetype)?;
        map.serialize_entry("source", &self.source)?;
        map.serialize_entry("icao_code", &self.icao_code)?;

        // Only the fields of the selected variant are emitted.
        match &self.kind {
            ChartKind::Approach { runways, subtype } => {
                map.serialize_entry("runways", runways)?;
                map.serialize_entry("subtype", subtype)?;
            }
            ChartKind::Departure {
                runways,
                subtype,
                sids,
            } => {
                map.serialize_entry("runways", runways)?;
                map.serialize_entry("subtype", subtype)?;
                map.serialize_entry("sids", sids)?;
            }
            ChartKind::Arrival {
                runways,
                subtype,
                stars,
            } => {
                map.serialize_entry("runways", runways)?;
                map.serialize_entry("subtype", subtype)?;
                map.serialize_entry("stars", stars)?;
            }
            ChartKind::Ground { subtype } => {
                map.serialize_entry("subtype", subtype)?;
            }
            ChartKind::Other(_) => {}
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base(chart_type: &str) -> serde_json::Value {
        json!({
            "title": "ILS RWY 03",
            "type": chart_type,
            "filename": "LPPT_IAC_03",
            "filetype": "application/pdf",
            "source": {
                "name": "NAV Portugal",
                "url": "https://www.nav.pt/ais",
                "contributor": "octocat",
                "cached": true
            },
            "icao_code": "LPPT"
        })
    }

    #[test]
    fn test_dispatch_approach() {
        let mut value = base("approach");
        value["runways"] = json!(["03"]);
        value["subtype"] = json!("ILS");

        let chart = Chart::from_value(value).unwrap();
        assert_eq!(
            chart.kind,
            ChartKind::Approach {
                runways: Some(vec!["03".to_string()]),
                subtype: Some("ILS".to_string()),
            }
        );
        assert_eq!(chart.source.unwrap().name, "NAV Portugal");
    }

    #[test]
    fn test_dispatch_departure_with_list_subtype() {
        let mut value = base("departure");
        value["subtype"] = json!(["RNAV", "CONV"]);
        value["sids"] = json!(["ADSAM1N"]);
        value["runways"] = json!(["*"]);

        let chart = Chart::from_value(value).unwrap();
        match chart.kind {
            ChartKind::Departure {
                runways,
                subtype,
                sids,
            } => {
                assert_eq!(runways, Some(vec!["*".to_string()]));
                assert_eq!(
                    subtype,
                    Some(Subtype::Many(vec!["RNAV".into(), "CONV".into()]))
                );
                assert_eq!(sids, Some(vec!["ADSAM1N".to_string()]));
            }
            other => panic!("expected departure, got {:?}", other),
        }
    }

    #[test]
    fn test_dispatch_arrival_and_ground() {
        let mut arrival = base("arrival");
        arrival["stars"] = json!(["ABRIX1A"]);
        let chart = Chart::from_value(arrival).unwrap();
        assert_eq!(chart.kind.stars(), Some(&["ABRIX1A".to_string()][..]));

        let mut ground = base("ground");
        ground["subtype"] = json!("parking");
        ground["runways"] = json!(["03"]);
        let chart = Chart::from_value(ground).unwrap();
        assert_eq!(
            chart.kind,
            ChartKind::Ground {
                subtype: Some("parking".to_string())
            }
        );
        assert_eq!(chart.kind.runways(), None);
    }

    #[test]
    fn test_unknown_discriminator_falls_back_to_base() {
        let chart = Chart::from_value(base("visual")).unwrap();
        assert_eq!(chart.kind, ChartKind::Other("visual".to_string()));
        assert_eq!(chart.chart_type(), "visual");

        // Case-sensitive dispatch
        let chart = Chart::from_value(base("Approach")).unwrap();
        assert_eq!(chart.kind, ChartKind::Other("Approach".to_string()));
    }

    #[test]
    fn test_missing_required_field_is_validation_error() {
        for field in ["title", "type", "filename", "filetype", "source", "icao_code"] {
            let mut value = base("approach");
            value.as_object_mut().unwrap().remove(field);
            let err = Chart::from_value(value).unwrap_err();
            assert!(
                matches!(err, ChartsError::Validation(_)),
                "missing {} gave {:?}",
                field,
                err
            );
        }
    }

    #[test]
    fn test_mistyped_field_is_validation_error() {
        let mut value = base("approach");
        value["title"] = json!(42);
        assert!(Chart::from_value(value).is_err());

        let mut value = base("approach");
        value["icao_code"] = json!("LISBON");
        assert!(Chart::from_value(value).is_err());
    }

    #[test]
    fn test_malformed_source_degrades_to_none() {
        let mut value = base("approach");
        value["source"] = json!({"name": "NAV Portugal"});
        let chart = Chart::from_value(value).unwrap();
        assert!(chart.source.is_none());

        let mut value = base("ground");
        value["source"] = json!("not a mapping");
        assert!(Chart::from_value(value).unwrap().source.is_none());
    }

    #[test]
    fn test_source_cached_defaults_true() {
        let source = Source::from_value(&json!({
            "name": "DFS",
            "url": "https://aip.dfs.de",
            "contributor": "octocat"
        }))
        .unwrap();
        assert!(source.cached);
    }

    #[test]
    fn test_approach_rejects_list_subtype() {
        let mut value = base("approach");
        value["subtype"] = json!(["ILS", "LOC"]);
        assert!(Chart::from_value(value).is_err());
    }

    #[test]
    fn test_departure_rejects_bracketed_single_subtype() {
        let mut value = base("departure");
        value["subtype"] = json!(r#"["RNAV"]"#);
        assert!(Chart::from_value(value).is_err());

        let mut value = base("arrival");
        value["subtype"] = json!(["RNAV"]);
        assert!(Chart::from_value(value).is_ok());
    }

    #[test]
    fn test_icao_code_is_normalized() {
        let mut value = base("ground");
        value["icao_code"] = json!("lppt");
        let chart = Chart::from_value(value).unwrap();
        assert_eq!(chart.icao_code.as_str(), "LPPT");
    }

    #[test]
    fn test_serialize_emits_variant_fields_only() {
        let chart = Chart::from_value(base("approach")).unwrap();
        let out = serde_json::to_value(&chart).unwrap();
        assert_eq!(out["type"], "approach");
        assert!(out.get("runways").unwrap().is_null());
        assert!(out.get("subtype").unwrap().is_null());
        assert!(out.get("sids").is_none());

        let chart = Chart::from_value(base("misc")).unwrap();
        let out = serde_json::to_value(&chart).unwrap();
        assert_eq!(out["type"], "misc");
        assert!(out.get("subtype").is_none());
        assert_eq!(out["source"]["contributor"], "octocat");
    }

    #[test]
    fn test_to_record_round_trips() {
        let mut value = base("arrival");
        value["subtype"] = json!("RNAV");
        value["stars"] = json!(["ABRIX1A", "ESP1A"]);
        let chart = Chart::from_value(value).unwrap();

        let record = chart.to_record();
        assert_eq!(record.sids, None);
        assert_eq!(Chart::try_from(record).unwrap(), chart);
    }
}
