//! Coverage statistics types for the flight-simulation traffic providers.

use serde::{Deserialize, Serialize};

use crate::error::ChartsError;

/// A third-party traffic network that coverage can be computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Poscon,
    Stp,
    Vatsim,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Poscon, Provider::Stp, Provider::Vatsim];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Poscon => "poscon",
            Provider::Stp => "stp",
            Provider::Vatsim => "vatsim",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = ChartsError;

    /// Case-insensitive match against the known provider names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poscon" => Ok(Provider::Poscon),
            "stp" => Ok(Provider::Stp),
            "vatsim" => Ok(Provider::Vatsim),
            _ => Err(ChartsError::invalid(
                "provider",
                format!("unknown coverage provider '{}'", s),
            )),
        }
    }
}

/// The fetch that was in flight when an upstream call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStage {
    /// VATSIM status document listing the data-feed mirrors.
    VatsimStatus,
    /// VATSIM data feed fetched from a mirror.
    VatsimDataFeed,
    /// POSCON online feed.
    PosconFeed,
    /// SimToolkitPro flights feed.
    StpFeed,
}

impl std::fmt::Display for FetchStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FetchStage::VatsimStatus => "VATSIM status document fetch",
            FetchStage::VatsimDataFeed => "VATSIM data feed fetch",
            FetchStage::PosconFeed => "POSCON data feed fetch",
            FetchStage::StpFeed => "SimToolkitPro data feed fetch",
        };
        f.write_str(s)
    }
}

/// Airports currently referenced by traffic on one provider.
///
/// Every list holds unique four-character codes. Recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStatistics {
    pub provider: Provider,
    pub departure_airports: Option<Vec<String>>,
    pub arrival_airports: Option<Vec<String>>,
    pub alternate_airports: Option<Vec<String>>,
}
