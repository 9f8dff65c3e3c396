use serde::{Deserialize, Serialize};

use super::{BikeCategory, Condition, EngineBand, FuelType, Transmission};

/// Attributes submitted for a car price estimate.
///
/// Make, model, year and mileage are required; the optional attributes
/// price with a neutral 1.0 multiplier when absent (or when the caller
/// submitted text the lenient parsers did not recognise).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarQuery {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u64,
    pub condition: Option<Condition>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
}

/// Attributes submitted for a bike price estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BikeQuery {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub mileage: u64,
    pub condition: Option<Condition>,
    pub category: Option<BikeCategory>,
    pub engine: Option<EngineBand>,
}
