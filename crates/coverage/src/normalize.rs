//! Reduction of collected airport codes into coverage statistics.

use std::collections::HashSet;

use charts_common::{CoverageStatistics, Provider};

/// Raw airport codes gathered from one provider feed, before cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedAirports {
    pub departures: Vec<String>,
    pub arrivals: Vec<String>,
    pub alternates: Vec<String>,
}

impl CollectedAirports {
    /// Clean every list and attach the provider.
    pub fn into_statistics(self, provider: Provider) -> CoverageStatistics {
        CoverageStatistics {
            provider,
            departure_airports: Some(clean_airports(self.departures)),
            arrival_airports: Some(clean_airports(self.arrivals)),
            alternate_airports: Some(clean_airports(self.alternates)),
        }
    }
}

/// De-duplicate and keep only four-character codes, in first-seen order.
///
/// ICAO codes are always four characters, so the length rule also drops
/// empty strings and provider sentinels like `NONE` or `-`.
pub fn clean_airports(codes: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    codes
        .into_iter()
        .filter(|code| code.chars().count() == 4)
        .filter(|code| seen.insert(code.clone()))
        .collect()
}
