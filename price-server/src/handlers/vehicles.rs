use axum::Json;
use axum::extract::{Path, State};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use price_core::RepositoryError;
use price_core::models::VehicleListing;

use crate::error::ApiError;
use crate::state::AppState;

/// Wire shape for one catalog entry. Prices are whole currency units, so
/// they go out as plain JSON numbers rather than decimal strings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDto {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: u64,
    pub condition: &'static str,
    pub fuel_type: &'static str,
    pub transmission: &'static str,
}

impl From<VehicleListing> for CarDto {
    fn from(listing: VehicleListing) -> Self {
        Self {
            price: listing.price.to_i64().unwrap_or(0),
            condition: listing.condition.as_str(),
            fuel_type: listing.fuel_type.as_str(),
            transmission: listing.transmission.as_str(),
            id: listing.id,
            make: listing.make,
            model: listing.model,
            year: listing.year,
            mileage: listing.mileage,
        }
    }
}

pub async fn list_cars(
    State(state): State<AppState>,
) -> Result<Json<Vec<CarDto>>, ApiError> {
    let vehicles = state.store.list_vehicles().await?;
    Ok(Json(vehicles.into_iter().map(CarDto::from).collect()))
}

pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CarDto>, ApiError> {
    let listing = state.store.get_vehicle(&id).await.map_err(|e| match e {
        RepositoryError::NotFound => ApiError::NotFound("Car".to_string()),
        other => other.into(),
    })?;
    Ok(Json(listing.into()))
}
