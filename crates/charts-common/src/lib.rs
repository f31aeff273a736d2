//! Common types shared across the chart catalogue crates.

pub mod chart;
pub mod coverage;
pub mod error;
pub mod icao;

pub use chart::{Chart, ChartKind, ChartRecord, Source, Subtype};
pub use coverage::{CoverageStatistics, FetchStage, Provider};
pub use error::{ChartsError, ChartsResult};
pub use icao::IcaoCode;
