//! Data pipeline behind the climate-action dashboard.
//!
//! [`catalog`] holds the pure record transformations, [`sources`] and
//! [`loader`] bring records in, and [`dashboard`] serves them over HTTP.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod sources;
pub mod telemetry;
