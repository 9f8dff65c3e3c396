//! Heuristic price estimation for cars and bikes.
//!
//! The whole estimate is a single-pass arithmetic pipeline: a base price
//! looked up from a table, a chain of multiplicative adjustment factors,
//! uniform jitter, and a rounded result with a confidence figure and a
//! low/high range. Every table the pipeline reads lives in
//! [`PricingTables`] and is passed in as data, so there is exactly one
//! implementation of the formula regardless of how many surfaces call it.

pub mod bike;
pub mod car;
pub mod common;
pub mod config;
pub mod jitter;

use thiserror::Error;

pub use bike::BikeEstimator;
pub use car::CarEstimator;
pub use config::{BikePricing, CarPricing, NoiseProfile, PricingTables};
pub use jitter::{FixedJitter, JitterSource, OsJitter};

/// Errors produced while validating a query before pricing it.
///
/// Unknown condition/fuel/category text is deliberately not an error; it
/// falls back to the neutral 1.0 multiplier at parse time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EstimateError {
    #[error("make is required")]
    MissingMake,

    #[error("model is required")]
    MissingModel,

    #[error("year {year} is outside the accepted range {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}
