//! Shared arithmetic for the estimation pipelines.
//!
//! Both estimators run the same tail: apply jitter, round to the whole
//! currency unit, derive confidence and the low/high range. Keeping that
//! tail here is what guarantees the car and bike paths cannot drift.

use rust_decimal::Decimal;

use crate::models::{Currency, PriceEstimate, PriceRange};

use super::config::NoiseProfile;
use super::jitter::JitterSource;

/// Rounds a value to the nearest whole currency unit using half-up
/// rounding (away from zero at the midpoint).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use price_core::pricing::common::round_to_unit;
///
/// assert_eq!(round_to_unit(dec!(42768.4)), dec!(42768));
/// assert_eq!(round_to_unit(dec!(42768.5)), dec!(42769));
/// ```
pub fn round_to_unit(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Age-based depreciation factor: `1 − age × rate`, floored.
///
/// A model year ahead of the current year yields a factor above 1.0; only
/// the lower bound is clamped.
pub fn depreciation_factor(
    current_year: i32,
    year: i32,
    rate: Decimal,
    floor: Decimal,
) -> Decimal {
    let age = Decimal::from(i64::from(current_year) - i64::from(year));
    (Decimal::ONE - age * rate).max(floor)
}

/// Mileage discount factor: `1 − mileage / scale`, floored.
pub fn mileage_factor(
    mileage: u64,
    scale: Decimal,
    floor: Decimal,
) -> Decimal {
    (Decimal::ONE - Decimal::from(mileage) / scale).max(floor)
}

/// Applies jitter to the noiseless price and assembles the final
/// [`PriceEstimate`]: rounded price, confidence, and the low/high range.
pub fn finish_estimate(
    noiseless: Decimal,
    noise: &NoiseProfile,
    range_low_factor: Decimal,
    range_high_factor: Decimal,
    market_label: &str,
    currency: Currency,
    jitter: &mut dyn JitterSource,
) -> PriceEstimate {
    let price = round_to_unit(noiseless * noise.jitter_multiplier(jitter.sample()));
    let confidence = noise.confidence(jitter.sample());

    PriceEstimate {
        estimated_price: price,
        confidence,
        market_comparison: market_label.to_string(),
        price_range: PriceRange {
            low: round_to_unit(price * range_low_factor),
            high: round_to_unit(price * range_high_factor),
        },
        currency,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_to_unit tests
    // =========================================================================

    #[test]
    fn round_to_unit_rounds_down_below_midpoint() {
        assert_eq!(round_to_unit(dec!(100.4)), dec!(100));
    }

    #[test]
    fn round_to_unit_rounds_up_at_midpoint() {
        assert_eq!(round_to_unit(dec!(100.5)), dec!(101));
    }

    #[test]
    fn round_to_unit_preserves_whole_values() {
        assert_eq!(round_to_unit(dec!(25000)), dec!(25000));
    }

    // =========================================================================
    // depreciation_factor tests
    // =========================================================================

    #[test]
    fn current_year_vehicle_has_unit_factor() {
        let f = depreciation_factor(2026, 2026, dec!(0.05), dec!(0.5));
        assert_eq!(f, dec!(1));
    }

    #[test]
    fn two_year_old_car_loses_ten_percent() {
        let f = depreciation_factor(2026, 2024, dec!(0.05), dec!(0.5));
        assert_eq!(f, dec!(0.90));
    }

    #[test]
    fn ancient_vehicle_clamps_at_the_floor() {
        // 50 years at 5%/year would go negative without the clamp.
        let f = depreciation_factor(2026, 1976, dec!(0.05), dec!(0.5));
        assert_eq!(f, dec!(0.5));
    }

    #[test]
    fn next_year_model_is_worth_more() {
        let f = depreciation_factor(2026, 2027, dec!(0.05), dec!(0.5));
        assert_eq!(f, dec!(1.05));
    }

    // =========================================================================
    // mileage_factor tests
    // =========================================================================

    #[test]
    fn zero_mileage_has_unit_factor() {
        assert_eq!(mileage_factor(0, dec!(100000), dec!(0.6)), dec!(1));
    }

    #[test]
    fn twenty_thousand_miles_discounts_twenty_percent() {
        assert_eq!(mileage_factor(20_000, dec!(100000), dec!(0.6)), dec!(0.8));
    }

    #[test]
    fn extreme_mileage_clamps_at_the_floor() {
        assert_eq!(
            mileage_factor(1_000_000, dec!(100000), dec!(0.6)),
            dec!(0.6)
        );
    }
}
