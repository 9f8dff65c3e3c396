use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Condition, FuelType, Transmission};

/// One entry in the sample vehicle catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleListing {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u64,
    pub condition: Condition,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
}

/// For inserting catalog entries. The id is caller-chosen (catalog keys
/// like `car1` come from the reference data, not a sequence).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicleListing {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u64,
    pub condition: Condition,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
}

impl NewVehicleListing {
    pub fn into_listing(self) -> VehicleListing {
        VehicleListing {
            id: self.id,
            make: self.make,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            condition: self.condition,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
        }
    }
}
