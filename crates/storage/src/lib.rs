//! Chart storage for the catalogue services.
//!
//! Provides:
//! - The [`ChartStore`] trait implemented by every backend
//! - PostgreSQL storage for production
//! - An in-memory store for tests and local development

pub mod memory;
pub mod postgres;
pub mod row;
pub mod store;

pub use memory::MemoryChartStore;
pub use postgres::{PgChartStore, PgStoreConfig};
pub use store::{ChartStore, UpsertOutcome};
