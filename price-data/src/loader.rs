use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use price_core::models::{
    Condition, FuelType, NewVehicleListing, Transmission,
};
use price_core::{RepositoryError, VehicleStore};

/// Errors that can occur when loading vehicle catalog data.
#[derive(Debug, Error)]
pub enum CatalogLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid condition '{0}' (expected excellent, good, fair or poor)")]
    InvalidCondition(String),

    #[error("Invalid fuel type '{0}' (expected gasoline, diesel, electric or hybrid)")]
    InvalidFuelType(String),

    #[error("Invalid transmission '{0}' (expected automatic or manual)")]
    InvalidTransmission(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for CatalogLoaderError {
    fn from(err: csv::Error) -> Self {
        CatalogLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the vehicle catalog CSV file.
///
/// Columns:
/// - `id`: Listing identifier (e.g., car1)
/// - `make` / `model` / `year`: The vehicle itself
/// - `price`: Asking price in whole currency units
/// - `mileage`: Odometer reading in miles
/// - `condition`: One of excellent, good, fair, poor
/// - `fuel_type`: One of gasoline, diesel, electric, hybrid
/// - `transmission`: One of automatic, manual
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct VehicleRecord {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    pub mileage: u64,
    pub condition: String,
    pub fuel_type: String,
    pub transmission: String,
}

impl TryFrom<VehicleRecord> for NewVehicleListing {
    type Error = CatalogLoaderError;

    fn try_from(record: VehicleRecord) -> Result<Self, Self::Error> {
        Ok(NewVehicleListing {
            condition: Condition::parse(&record.condition)
                .ok_or(CatalogLoaderError::InvalidCondition(record.condition))?,
            fuel_type: FuelType::parse(&record.fuel_type)
                .ok_or(CatalogLoaderError::InvalidFuelType(record.fuel_type))?,
            transmission: Transmission::parse(&record.transmission)
                .ok_or(CatalogLoaderError::InvalidTransmission(record.transmission))?,
            id: record.id,
            make: record.make,
            model: record.model,
            year: record.year,
            price: record.price,
            mileage: record.mileage,
        })
    }
}

/// Loader for vehicle catalog data from CSV files.
///
/// The loader reads CSV data and inserts it into the database via the
/// `VehicleStore` trait, allowing it to work with any storage backend.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parse vehicle records from a CSV reader.
    ///
    /// Returns a vector of parsed records. The reader can be any type that
    /// implements `Read`, such as a file or a string slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<VehicleRecord>, CatalogLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: VehicleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load vehicle records into the database.
    ///
    /// Every record is validated (condition, fuel type and transmission
    /// must name a known value) and inserted through the store. Inserting
    /// a listing whose id already exists is a repository error, so loading
    /// is not idempotent; use a fresh database or distinct ids.
    pub async fn load<S>(
        store: &S,
        records: Vec<VehicleRecord>,
    ) -> Result<usize, CatalogLoaderError>
    where
        S: VehicleStore + ?Sized,
    {
        let mut inserted = 0;

        for record in records {
            let listing = NewVehicleListing::try_from(record)?;
            store.insert_vehicle(listing).await?;
            inserted += 1;
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use price_core::db::memory::MemoryStore;

    use super::*;

    const TEST_CSV: &str = r#"id,make,model,year,price,mileage,condition,fuel_type,transmission
car1,Toyota,Camry,2022,25000,15000,excellent,gasoline,automatic
car2,Honda,Civic,2021,22000,22000,good,gasoline,manual
car3,Tesla,Model 3,2023,38000,8000,excellent,electric,automatic
"#;

    #[test]
    fn parse_single_record() {
        let csv = "id,make,model,year,price,mileage,condition,fuel_type,transmission\n\
                   car1,Toyota,Camry,2022,25000,15000,excellent,gasoline,automatic";

        let records = CatalogLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0],
            VehicleRecord {
                id: "car1".to_string(),
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2022,
                price: dec!(25000),
                mileage: 15_000,
                condition: "excellent".to_string(),
                fuel_type: "gasoline".to_string(),
                transmission: "automatic".to_string(),
            }
        );
    }

    #[test]
    fn parse_all_records() {
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records.len(), 3);
        assert_eq!(records[2].make, "Tesla");
        assert_eq!(records[2].fuel_type, "electric");
    }

    #[test]
    fn parse_empty_csv() {
        let csv = "id,make,model,year,price,mileage,condition,fuel_type,transmission\n";

        let records = CatalogLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn parse_missing_column_fails() {
        let csv = "id,make,model\ncar1,Toyota,Camry";

        let err = CatalogLoader::parse(csv.as_bytes()).expect_err("Should fail");
        let CatalogLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn parse_bad_price_fails() {
        let csv = "id,make,model,year,price,mileage,condition,fuel_type,transmission\n\
                   car1,Toyota,Camry,2022,lots,15000,excellent,gasoline,automatic";

        let result = CatalogLoader::parse(csv.as_bytes());
        assert!(matches!(result, Err(CatalogLoaderError::CsvParse(_))));
    }

    #[test]
    fn record_with_unknown_condition_is_rejected() {
        let record = VehicleRecord {
            id: "car1".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            price: dec!(25000),
            mileage: 15_000,
            condition: "mint".to_string(),
            fuel_type: "gasoline".to_string(),
            transmission: "automatic".to_string(),
        };

        match NewVehicleListing::try_from(record) {
            Err(CatalogLoaderError::InvalidCondition(value)) => assert_eq!(value, "mint"),
            other => panic!("expected InvalidCondition, got {other:?}"),
        }
    }

    #[test]
    fn record_with_unknown_fuel_type_is_rejected() {
        let record = VehicleRecord {
            id: "car1".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2022,
            price: dec!(25000),
            mileage: 15_000,
            condition: "good".to_string(),
            fuel_type: "steam".to_string(),
            transmission: "automatic".to_string(),
        };

        assert!(matches!(
            NewVehicleListing::try_from(record),
            Err(CatalogLoaderError::InvalidFuelType(_))
        ));
    }

    #[tokio::test]
    async fn load_inserts_every_record() {
        let store = MemoryStore::new();
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let inserted = CatalogLoader::load(&store, records).await.expect("load");

        assert_eq!(inserted, 3);
        let vehicles = store.list_vehicles().await.expect("list");
        assert_eq!(vehicles.len(), 3);
        assert_eq!(vehicles[0].id, "car1");
        assert_eq!(vehicles[0].condition, Condition::Excellent);
    }

    #[tokio::test]
    async fn load_duplicate_id_surfaces_repository_error() {
        let store = MemoryStore::new();
        let records = CatalogLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");
        CatalogLoader::load(&store, records.clone()).await.expect("first load");

        let result = CatalogLoader::load(&store, records).await;
        assert!(matches!(result, Err(CatalogLoaderError::Repository(_))));
    }
}
