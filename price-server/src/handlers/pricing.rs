use axum::Json;
use axum::extract::{Query, State};
use chrono::{Datelike, Utc};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use price_core::models::{BikeCategory, BikeQuery, CarQuery, Condition, EngineBand, FuelType, PriceEstimate, Transmission};
use price_core::pricing::jitter::OsJitter;
use price_core::{BikeEstimator, CarEstimator};

use crate::error::ApiError;
use crate::state::AppState;

/// Car estimate request. Optional attributes that are absent or carry an
/// unrecognised value fall back to a neutral multiplier, mirroring how
/// absent fields price.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictPriceRequest {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub mileage: u64,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub fuel_type: Option<String>,
    #[serde(default)]
    pub transmission: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeDto {
    pub low: i64,
    pub high: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictPriceResponse {
    pub estimated_price: i64,
    pub confidence: f64,
    pub market_comparison: String,
    pub price_range: PriceRangeDto,
}

impl From<PriceEstimate> for PredictPriceResponse {
    fn from(estimate: PriceEstimate) -> Self {
        Self {
            estimated_price: estimate.estimated_price.to_i64().unwrap_or(0),
            confidence: estimate.confidence,
            market_comparison: estimate.market_comparison,
            price_range: PriceRangeDto {
                low: estimate.price_range.low.to_i64().unwrap_or(0),
                high: estimate.price_range.high.to_i64().unwrap_or(0),
            },
        }
    }
}

pub async fn predict_price(
    State(state): State<AppState>,
    Json(req): Json<PredictPriceRequest>,
) -> Result<Json<PredictPriceResponse>, ApiError> {
    let query = CarQuery {
        condition: req.condition.as_deref().and_then(Condition::parse),
        fuel_type: req.fuel_type.as_deref().and_then(FuelType::parse),
        transmission: req.transmission.as_deref().and_then(Transmission::parse),
        make: req.make,
        model: req.model,
        year: req.year,
        mileage: req.mileage,
    };

    let estimator = CarEstimator::new(&state.pricing.car);
    let mut jitter = OsJitter::new();
    let estimate = estimator.estimate(&query, Utc::now().year(), &mut jitter)?;

    Ok(Json(estimate.into()))
}

/// Bike estimate query string. The shape matches what the mobile client
/// already sends to the scraper endpoint it replaces.
#[derive(Debug, Deserialize)]
pub struct BikePriceParams {
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    pub year: Option<i32>,
    #[serde(default)]
    pub mileage: u64,
    pub condition: Option<String>,
    #[serde(rename = "bikeType")]
    pub bike_type: Option<String>,
    #[serde(rename = "engineSize")]
    pub engine_size: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BikePriceResponse {
    pub average_price: i64,
    pub min_price: i64,
    pub max_price: i64,
    pub confidence: f64,
    pub currency: &'static str,
    pub source: &'static str,
}

pub async fn bike_price(
    State(state): State<AppState>,
    Query(params): Query<BikePriceParams>,
) -> Result<Json<BikePriceResponse>, ApiError> {
    let year = params
        .year
        .ok_or_else(|| ApiError::Validation("year is required".to_string()))?;

    let query = BikeQuery {
        condition: params.condition.as_deref().and_then(Condition::parse),
        category: params.bike_type.as_deref().and_then(BikeCategory::parse),
        engine: params.engine_size.as_deref().and_then(EngineBand::parse),
        make: params.make,
        model: params.model,
        year,
        mileage: params.mileage,
    };

    let estimator = BikeEstimator::new(&state.pricing.bike);
    let mut jitter = OsJitter::new();
    let estimate = estimator.estimate(&query, Utc::now().year(), &mut jitter)?;

    Ok(Json(BikePriceResponse {
        average_price: estimate.estimated_price.to_i64().unwrap_or(0),
        min_price: estimate.price_range.low.to_i64().unwrap_or(0),
        max_price: estimate.price_range.high.to_i64().unwrap_or(0),
        confidence: estimate.confidence,
        currency: estimate.currency.code(),
        source: "estimator",
    }))
}
