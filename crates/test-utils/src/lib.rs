//! Shared test utilities for the chart catalogue workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Chart and manifest fixtures
//! - Canned payloads for the coverage providers
//! - A local fake upstream HTTP server
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{approach_chart, FakeUpstream};
//! ```

pub mod fixtures;
pub mod upstream;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use upstream::*;

/// Assert that a list of strings holds exactly the given items, in any order.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_same_items;
///
/// assert_same_items!(stats.departure_airports.unwrap(), ["LPPT", "EDDM"]);
/// ```
#[macro_export]
macro_rules! assert_same_items {
    ($left:expr, [$($item:expr),* $(,)?]) => {{
        let mut left: Vec<String> = $left.into_iter().map(|s| s.to_string()).collect();
        let mut right: Vec<String> = vec![$($item.to_string()),*];
        left.sort();
        right.sort();
        assert_eq!(left, right);
    }};
}
