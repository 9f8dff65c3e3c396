//! Pricing tables, passed to the estimators as data.
//!
//! The `Default` implementations carry the reference tables the service
//! ships with. Nothing in the pipeline hard-codes a number: swap the
//! tables and every call site prices differently.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::warn;

use crate::models::{BikeCategory, Condition, Currency, EngineBand, FuelType};

/// Multiplier per condition grade. An absent (or unrecognised) grade
/// prices with the neutral 1.0 multiplier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionMultipliers {
    pub excellent: Decimal,
    pub good: Decimal,
    pub fair: Decimal,
    pub poor: Decimal,
}

impl ConditionMultipliers {
    pub fn multiplier(&self, condition: Option<Condition>) -> Decimal {
        match condition {
            Some(Condition::Excellent) => self.excellent,
            Some(Condition::Good) => self.good,
            Some(Condition::Fair) => self.fair,
            Some(Condition::Poor) => self.poor,
            None => Decimal::ONE,
        }
    }
}

/// Jitter and confidence parameters.
///
/// The jitter multiplier is `jitter_low + jitter_span × u` for a uniform
/// `u ∈ [0, 1)`; confidence is `confidence_base + confidence_span × u`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseProfile {
    pub jitter_low: Decimal,
    pub jitter_span: Decimal,
    pub confidence_base: f64,
    pub confidence_span: f64,
}

impl NoiseProfile {
    pub fn jitter_multiplier(&self, sample: f64) -> Decimal {
        // A sample outside [0, 1) cannot come from a conforming source;
        // fall back to the midpoint rather than skew the price.
        let u = Decimal::from_f64(sample)
            .filter(|u| (Decimal::ZERO..Decimal::ONE).contains(u))
            .unwrap_or_else(|| {
                warn!(sample, "jitter sample outside [0, 1), using midpoint");
                Decimal::new(5, 1)
            });
        self.jitter_low + self.jitter_span * u
    }

    pub fn confidence(&self, sample: f64) -> f64 {
        self.confidence_base + self.confidence_span * sample
    }
}

/// Tables for the car pipeline. Prices are USD.
#[derive(Debug, Clone, PartialEq)]
pub struct CarPricing {
    /// Base price keyed by lower-cased make.
    pub base_price_by_make: HashMap<String, Decimal>,
    /// Base price for makes absent from the table.
    pub default_base_price: Decimal,
    /// Earliest model year the intake form accepts.
    pub min_year: i32,
    /// Fraction of value lost per year of age.
    pub depreciation_rate: Decimal,
    pub year_factor_floor: Decimal,
    /// Mileage at which the linear discount would reach zero.
    pub mileage_scale: Decimal,
    pub mileage_factor_floor: Decimal,
    pub condition: ConditionMultipliers,
    pub fuel_gasoline: Decimal,
    pub fuel_diesel: Decimal,
    pub fuel_electric: Decimal,
    pub fuel_hybrid: Decimal,
    pub noise: NoiseProfile,
    pub range_low_factor: Decimal,
    pub range_high_factor: Decimal,
    pub market_label: String,
    pub currency: Currency,
}

impl CarPricing {
    /// Base price for a make, case-insensitively; unknown makes use the
    /// default rather than erroring.
    pub fn base_price(&self, make: &str) -> Decimal {
        self.base_price_by_make
            .get(&make.trim().to_ascii_lowercase())
            .copied()
            .unwrap_or(self.default_base_price)
    }

    pub fn fuel_multiplier(&self, fuel: Option<FuelType>) -> Decimal {
        match fuel {
            Some(FuelType::Gasoline) => self.fuel_gasoline,
            Some(FuelType::Diesel) => self.fuel_diesel,
            Some(FuelType::Electric) => self.fuel_electric,
            Some(FuelType::Hybrid) => self.fuel_hybrid,
            None => Decimal::ONE,
        }
    }
}

impl Default for CarPricing {
    fn default() -> Self {
        let base_price_by_make = [
            ("toyota", 25_000),
            ("honda", 23_000),
            ("ford", 35_000),
            ("tesla", 45_000),
            ("bmw", 42_000),
            ("audi", 40_000),
            ("mercedes", 50_000),
            ("lexus", 45_000),
            ("chevrolet", 30_000),
            ("nissan", 22_000),
        ]
        .into_iter()
        .map(|(make, price)| (make.to_string(), Decimal::from(price)))
        .collect();

        Self {
            base_price_by_make,
            default_base_price: Decimal::from(25_000),
            min_year: 1900,
            depreciation_rate: Decimal::new(5, 2),
            year_factor_floor: Decimal::new(5, 1),
            mileage_scale: Decimal::from(100_000),
            mileage_factor_floor: Decimal::new(6, 1),
            condition: ConditionMultipliers {
                excellent: Decimal::new(11, 1),
                good: Decimal::ONE,
                fair: Decimal::new(9, 1),
                poor: Decimal::new(7, 1),
            },
            fuel_gasoline: Decimal::ONE,
            fuel_diesel: Decimal::new(105, 2),
            fuel_electric: Decimal::new(12, 1),
            fuel_hybrid: Decimal::new(11, 1),
            noise: NoiseProfile {
                jitter_low: Decimal::new(95, 2),
                jitter_span: Decimal::new(10, 2),
                confidence_base: 0.85,
                confidence_span: 0.10,
            },
            range_low_factor: Decimal::new(9, 1),
            range_high_factor: Decimal::new(11, 1),
            market_label: "Average".to_string(),
            currency: Currency::Usd,
        }
    }
}

/// Tables for the bike pipeline. Prices are INR; base prices key off the
/// category rather than the make, and mileage carries no weight.
#[derive(Debug, Clone, PartialEq)]
pub struct BikePricing {
    pub base_standard: Decimal,
    pub base_sports: Decimal,
    pub base_cruiser: Decimal,
    pub base_touring: Decimal,
    pub base_off_road: Decimal,
    pub base_scooter: Decimal,
    pub base_electric: Decimal,
    /// Base price when no category was recognised.
    pub default_base_price: Decimal,
    pub min_year: i32,
    /// Bikes depreciate faster than cars.
    pub depreciation_rate: Decimal,
    pub year_factor_floor: Decimal,
    pub condition: ConditionMultipliers,
    pub engine_under_125: Decimal,
    pub engine_125_to_150: Decimal,
    pub engine_150_to_250: Decimal,
    pub engine_250_to_500: Decimal,
    pub engine_500_to_750: Decimal,
    pub engine_over_750: Decimal,
    pub noise: NoiseProfile,
    pub range_low_factor: Decimal,
    pub range_high_factor: Decimal,
    pub market_label: String,
    pub currency: Currency,
}

impl BikePricing {
    pub fn base_price(&self, category: Option<BikeCategory>) -> Decimal {
        match category {
            Some(BikeCategory::Standard) => self.base_standard,
            Some(BikeCategory::Sports) => self.base_sports,
            Some(BikeCategory::Cruiser) => self.base_cruiser,
            Some(BikeCategory::Touring) => self.base_touring,
            Some(BikeCategory::OffRoad) => self.base_off_road,
            Some(BikeCategory::Scooter) => self.base_scooter,
            Some(BikeCategory::Electric) => self.base_electric,
            None => self.default_base_price,
        }
    }

    pub fn engine_multiplier(&self, engine: Option<EngineBand>) -> Decimal {
        match engine {
            Some(EngineBand::Under125) => self.engine_under_125,
            Some(EngineBand::From125To150) => self.engine_125_to_150,
            Some(EngineBand::From150To250) => self.engine_150_to_250,
            Some(EngineBand::From250To500) => self.engine_250_to_500,
            Some(EngineBand::From500To750) => self.engine_500_to_750,
            Some(EngineBand::Over750) => self.engine_over_750,
            None => Decimal::ONE,
        }
    }
}

impl Default for BikePricing {
    fn default() -> Self {
        Self {
            base_standard: Decimal::from(100_000),
            base_sports: Decimal::from(150_000),
            base_cruiser: Decimal::from(180_000),
            base_touring: Decimal::from(200_000),
            base_off_road: Decimal::from(120_000),
            base_scooter: Decimal::from(80_000),
            base_electric: Decimal::from(110_000),
            default_base_price: Decimal::from(100_000),
            min_year: 1990,
            depreciation_rate: Decimal::new(1, 1),
            year_factor_floor: Decimal::new(3, 1),
            condition: ConditionMultipliers {
                excellent: Decimal::new(115, 2),
                good: Decimal::ONE,
                fair: Decimal::new(8, 1),
                poor: Decimal::new(6, 1),
            },
            engine_under_125: Decimal::new(8, 1),
            engine_125_to_150: Decimal::new(9, 1),
            engine_150_to_250: Decimal::ONE,
            engine_250_to_500: Decimal::new(13, 1),
            engine_500_to_750: Decimal::new(18, 1),
            engine_over_750: Decimal::new(25, 1),
            noise: NoiseProfile {
                jitter_low: Decimal::new(95, 2),
                jitter_span: Decimal::new(10, 2),
                confidence_base: 0.70,
                confidence_span: 0.0,
            },
            range_low_factor: Decimal::new(85, 2),
            range_high_factor: Decimal::new(115, 2),
            market_label: "Estimated".to_string(),
            currency: Currency::Inr,
        }
    }
}

/// Everything a serving process needs to price both vehicle kinds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingTables {
    pub car: CarPricing,
    pub bike: BikePricing,
}
