//! Coverage statistics for flight-simulation traffic networks.
//!
//! Each provider publishes live traffic in its own JSON shape. The
//! providers here reduce those shapes to departure, arrival and alternate
//! airport lists, which are then cleaned into one [`CoverageStatistics`].
//!
//! [`CoverageStatistics`]: charts_common::CoverageStatistics

pub mod client;
pub mod normalize;
pub mod providers;

pub use client::{CoverageClient, CoverageEndpoints, UpstreamClient};
pub use normalize::{clean_airports, CollectedAirports};
pub use providers::{CoverageProvider, PosconProvider, StpProvider, VatsimProvider};
