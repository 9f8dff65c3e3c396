//! Car price estimation.
//!
//! # Pipeline
//!
//! | Step | Factor |
//! |------|--------|
//! | 1    | Base price by lower-cased make (default for unknown makes) |
//! | 2    | Year factor `1 − age × 0.05`, floored at 0.5 |
//! | 3    | Mileage factor `1 − mileage/100000`, floored at 0.6 |
//! | 4    | Condition multiplier (excellent 1.1 … poor 0.7) |
//! | 5    | Fuel multiplier (electric 1.2, hybrid 1.1, diesel 1.05) |
//! | 6    | Uniform jitter `× (0.95 + u × 0.10)` |
//! | 7    | Round to the whole dollar |
//!
//! # Example
//!
//! ```
//! use price_core::models::{CarQuery, Condition, FuelType};
//! use price_core::pricing::{CarEstimator, CarPricing, FixedJitter};
//! use rust_decimal_macros::dec;
//!
//! let pricing = CarPricing::default();
//! let query = CarQuery {
//!     make: "Tesla".to_string(),
//!     model: "Model 3".to_string(),
//!     year: 2024,
//!     mileage: 20_000,
//!     condition: Some(Condition::Excellent),
//!     fuel_type: Some(FuelType::Electric),
//!     transmission: None,
//! };
//!
//! let estimate = CarEstimator::new(&pricing)
//!     .estimate(&query, 2026, &mut FixedJitter::midpoint())
//!     .unwrap();
//!
//! // 45000 × 0.9 × 0.8 × 1.1 × 1.2
//! assert_eq!(estimate.estimated_price, dec!(42768));
//! ```

use rust_decimal::Decimal;

use crate::models::{CarQuery, PriceEstimate};

use super::EstimateError;
use super::common::{depreciation_factor, finish_estimate, mileage_factor};
use super::config::CarPricing;
use super::jitter::JitterSource;

/// Calculator for car queries. Borrows the pricing tables; one instance
/// can serve any number of estimates.
#[derive(Debug, Clone)]
pub struct CarEstimator<'a> {
    pricing: &'a CarPricing,
}

impl<'a> CarEstimator<'a> {
    pub fn new(pricing: &'a CarPricing) -> Self {
        Self { pricing }
    }

    /// Prices one query.
    ///
    /// `current_year` is passed in rather than read from the clock so the
    /// computation stays a pure function of its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError`] if make or model is blank, or the year is
    /// outside the accepted range.
    pub fn estimate(
        &self,
        query: &CarQuery,
        current_year: i32,
        jitter: &mut dyn JitterSource,
    ) -> Result<PriceEstimate, EstimateError> {
        self.validate(query, current_year)?;

        let noiseless = self.base_price(query)
            * self.year_factor(query, current_year)
            * self.mileage_factor(query)
            * self.condition_multiplier(query)
            * self.fuel_multiplier(query);

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
        query: &CarQuery,
        current_year: i32,
    ) -> Result<(), EstimateError> {
        if query.make.trim().is_empty() {
            return Err(EstimateError::MissingMake);
        }
        if query.model.trim().is_empty() {
            return Err(EstimateError::MissingModel);
        }

        // Next year's models are already on sale, so allow current + 1.
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

    fn base_price(
        &self,
        query: &CarQuery,
    ) -> Decimal {
        self.pricing.base_price(&query.make)
    }

    fn year_factor(
        &self,
        query: &CarQuery,
        current_year: i32,
    ) -> Decimal {
        depreciation_factor(
            current_year,
            query.year,
            self.pricing.depreciation_rate,
            self.pricing.year_factor_floor,
        )
    }

    fn mileage_factor(
        &self,
        query: &CarQuery,
    ) -> Decimal {
        mileage_factor(
            query.mileage,
            self.pricing.mileage_scale,
            self.pricing.mileage_factor_floor,
        )
    }

    fn condition_multiplier(
        &self,
        query: &CarQuery,
    ) -> Decimal {
        self.pricing.condition.multiplier(query.condition)
    }

    fn fuel_multiplier(
        &self,
        query: &CarQuery,
    ) -> Decimal {
        self.pricing.fuel_multiplier(query.fuel_type)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::{CarQuery, Condition, Currency, FuelType};
    use crate::pricing::jitter::{FixedJitter, OsJitter};

    use super::*;

    const CURRENT_YEAR: i32 = 2026;

    fn query() -> CarQuery {
        CarQuery {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: CURRENT_YEAR,
            mileage: 0,
            condition: Some(Condition::Good),
            fuel_type: Some(FuelType::Gasoline),
            transmission: None,
        }
    }

    fn estimate(query: &CarQuery) -> PriceEstimate {
        let pricing = CarPricing::default();
        CarEstimator::new(&pricing)
            .estimate(query, CURRENT_YEAR, &mut FixedJitter::midpoint())
            .unwrap()
    }

    // =========================================================================
    // reference values
    // =========================================================================

    #[test]
    fn new_toyota_prices_at_its_base() {
        // All factors at 1.0 — the estimate is exactly the base price.
        let result = estimate(&query());

        assert_eq!(result.estimated_price, dec!(25000));
        assert_eq!(result.price_range.low, dec!(22500));
        assert_eq!(result.price_range.high, dec!(27500));
        assert_eq!(result.market_comparison, "Average");
        assert_eq!(result.currency, Currency::Usd);
    }

    #[test]
    fn two_year_old_tesla_matches_the_hand_computed_value() {
        let result = estimate(&CarQuery {
            make: "Tesla".to_string(),
            model: "Model 3".to_string(),
            year: CURRENT_YEAR - 2,
            mileage: 20_000,
            condition: Some(Condition::Excellent),
            fuel_type: Some(FuelType::Electric),
            transmission: None,
        });

        // 45000 × 0.9 × 0.8 × 1.1 × 1.2 = 42768
        assert_eq!(result.estimated_price, dec!(42768));
    }

    // =========================================================================
    // fallbacks and floors
    // =========================================================================

    #[test]
    fn unknown_make_prices_at_the_default_base() {
        let result = estimate(&CarQuery {
            make: "Zastava".to_string(),
            ..query()
        });

        assert_eq!(result.estimated_price, dec!(25000));
    }

    #[test]
    fn absent_condition_and_fuel_price_the_same_as_neutral() {
        let neutral = estimate(&CarQuery {
            condition: None,
            fuel_type: None,
            ..query()
        });

        assert_eq!(neutral.estimated_price, estimate(&query()).estimated_price);
    }

    #[test]
    fn fifty_year_old_car_keeps_half_its_base() {
        let result = estimate(&CarQuery {
            year: CURRENT_YEAR - 50,
            ..query()
        });

        // Year factor clamps at 0.5 instead of going negative.
        assert_eq!(result.estimated_price, dec!(12500));
    }

    #[test]
    fn extreme_mileage_keeps_sixty_percent() {
        let result = estimate(&CarQuery {
            mileage: 1_000_000,
            ..query()
        });

        assert_eq!(result.estimated_price, dec!(15000));
    }

    // =========================================================================
    // jitter bounds and range ordering
    // =========================================================================

    #[test]
    fn jitter_never_leaves_the_five_percent_band() {
        let pricing = CarPricing::default();
        let estimator = CarEstimator::new(&pricing);
        let noiseless = dec!(25000);
        let mut source = OsJitter::new();

        for _ in 0..200 {
            let result = estimator
                .estimate(&query(), CURRENT_YEAR, &mut source)
                .unwrap();
            assert!(result.estimated_price >= noiseless * dec!(0.95));
            // The jitter sample is strictly below 1.0, but rounding to the
            // whole dollar can land exactly on the 1.05 edge.
            assert!(result.estimated_price <= noiseless * dec!(1.05));
        }
    }

    #[test]
    fn range_straddles_the_estimate() {
        let result = estimate(&query());

        assert!(result.price_range.low < result.estimated_price);
        assert!(result.estimated_price < result.price_range.high);
    }

    #[test]
    fn confidence_is_a_probability() {
        let pricing = CarPricing::default();
        let estimator = CarEstimator::new(&pricing);
        let mut source = OsJitter::new();

        for _ in 0..200 {
            let result = estimator
                .estimate(&query(), CURRENT_YEAR, &mut source)
                .unwrap();
            assert!((0.0..=1.0).contains(&result.confidence));
        }
    }

    #[test]
    fn lowest_jitter_sample_prices_five_percent_under() {
        let pricing = CarPricing::default();
        let result = CarEstimator::new(&pricing)
            .estimate(&query(), CURRENT_YEAR, &mut FixedJitter::new(0.0))
            .unwrap();

        assert_eq!(result.estimated_price, dec!(23750));
    }

    // =========================================================================
    // validation
    // =========================================================================

    #[test]
    fn blank_make_is_rejected() {
        let pricing = CarPricing::default();
        let result = CarEstimator::new(&pricing).estimate(
            &CarQuery {
                make: "   ".to_string(),
                ..query()
            },
            CURRENT_YEAR,
            &mut FixedJitter::midpoint(),
        );

        assert_eq!(result, Err(EstimateError::MissingMake));
    }

    #[test]
    fn blank_model_is_rejected() {
        let pricing = CarPricing::default();
        let result = CarEstimator::new(&pricing).estimate(
            &CarQuery {
                model: String::new(),
                ..query()
            },
            CURRENT_YEAR,
            &mut FixedJitter::midpoint(),
        );

        assert_eq!(result, Err(EstimateError::MissingModel));
    }

    #[test]
    fn far_future_year_is_rejected() {
        let pricing = CarPricing::default();
        let result = CarEstimator::new(&pricing).estimate(
            &CarQuery {
                year: CURRENT_YEAR + 2,
                ..query()
            },
            CURRENT_YEAR,
            &mut FixedJitter::midpoint(),
        );

        assert_eq!(
            result,
            Err(EstimateError::YearOutOfRange {
                year: CURRENT_YEAR + 2,
                min: 1900,
                max: CURRENT_YEAR + 1,
            })
        );
    }

    #[test]
    fn next_year_model_is_accepted() {
        let result = estimate(&CarQuery {
            year: CURRENT_YEAR + 1,
            ..query()
        });

        // 25000 × 1.05
        assert_eq!(result.estimated_price, dec!(26250));
    }
}
