//! Bike price estimation.
//!
//! Bikes differ from cars in three ways: the base price keys off the
//! category rather than the make, an engine-displacement multiplier
//! replaces the fuel multiplier, and mileage carries no weight. They also
//! depreciate twice as fast (10%/year, floored at 0.3) and price in INR.

use rust_decimal::Decimal;

use crate::models::{BikeQuery, PriceEstimate};

use super::EstimateError;
use super::common::{depreciation_factor, finish_estimate};
use super::config::BikePricing;
use super::jitter::JitterSource;

/// Calculator for bike queries.
#[derive(Debug, Clone)]
pub struct BikeEstimator<'a> {
    pricing: &'a BikePricing,
}

impl<'a> BikeEstimator<'a> {
    pub fn new(pricing: &'a BikePricing) -> Self {
        Self { pricing }
    }

    /// Prices one query.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError`] if make or model is blank, or the year is
    /// outside the accepted range.
    pub fn estimate(
        &self,
        query: &BikeQuery,
        current_year: i32,
        jitter: &mut dyn JitterSource,
    ) -> Result<PriceEstimate, EstimateError> {
        self.validate(query, current_year)?;

        let noiseless = self.pricing.base_price(query.category)
            * self.pricing.engine_multiplier(query.engine)
            * self.year_factor(query, current_year)
            * self.pricing.condition.multiplier(query.condition);

        Ok(finish_estimate(
            noiseless,
            &self.pricing.noise,
            self.pricing.range_low_factor,
            self.pricing.range_high_factor,
            &self.pricing.market_label,
            self.pricing.currency,
            jitter,
        ))
    }

    fn validate(
        &self,
        query: &BikeQuery,
        current_year: i32,
    ) -> Result<(), EstimateError> {
        if query.make.trim().is_empty() {
            return Err(EstimateError::MissingMake);
        }
        if query.model.trim().is_empty() {
            return Err(EstimateError::MissingModel);
        }

        let max_year = current_year + 1;
        if query.year < self.pricing.min_year || query.year > max_year {
            return Err(EstimateError::YearOutOfRange {
                year: query.year,
                min: self.pricing.min_year,
                max: max_year,
            });
        }

        Ok(())
    }

    fn year_factor(
        &self,
        query: &BikeQuery,
        current_year: i32,
    ) -> Decimal {
        depreciation_factor(
            current_year,
            query.year,
            self.pricing.depreciation_rate,
            self.pricing.year_factor_floor,
        )
    }
}
