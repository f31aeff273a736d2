//! Chart Catalogue Service Library
//!
//! HTTP service for aeronautical charts keyed by airport ICAO code, plus
//! live traffic coverage statistics from flight-simulation networks.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;
pub mod state;
pub mod telemetry;
