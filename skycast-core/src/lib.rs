//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration handling & first-run location detection
//! - A small client for the api.weather.gov JSON endpoints
//! - The observation/forecast data model and display formatting
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod format;
pub mod model;

pub use client::{FetchError, NwsClient, PointInfo, StationInfo};
pub use config::{Config, DetectedLocation, detect_location};
pub use model::{ForecastPeriod, Measurement, Observation};
