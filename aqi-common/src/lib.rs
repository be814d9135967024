//! # AQI Common Library
//!
//! Shared code for the AQI service crates:
//! - Pollutant readings and their input coercion rules
//! - AQI classification buckets
//! - Common error type
//! - Service configuration loading

pub mod classification;
pub mod config;
pub mod error;
pub mod pollutants;

pub use classification::AqiCategory;
pub use error::{Error, Result};
pub use pollutants::{Pollutant, PollutantPatch, Pollutants};
